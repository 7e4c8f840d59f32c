//! Meetup planner server.
//!
//! Answers the questions a meetup organizer has about stations: which lines
//! stop here, how to draw them, which stations match a name, and which
//! candidate stations have been saved.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod remote;
pub mod storage;
pub mod transfers;
pub mod web;
