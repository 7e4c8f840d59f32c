//! Route descriptors and (operator, route) references.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RouteColor;

/// How a route is drawn: its line color and a short badge label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub color: RouteColor,
    pub short_text: String,
}

impl RouteDescriptor {
    pub fn new(color: RouteColor, short_text: impl Into<String>) -> Self {
        Self {
            color,
            short_text: short_text.into(),
        }
    }

    /// Whether the badge renders as a pill (multi-character label) rather
    /// than a circle.
    pub fn is_wide(&self) -> bool {
        self.short_text.chars().count() > 1
    }
}

/// One (operator, route) pair associated with a station.
///
/// Used both for a station's own line and for each transfer option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRef {
    pub company_name: String,
    pub route_name: String,
}

impl RouteRef {
    pub fn new(company_name: impl Into<String>, route_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            route_name: route_name.into(),
        }
    }
}

impl fmt::Display for RouteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.company_name, self.route_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_json_uses_camel_case() {
        let json = r##"{"color":"#F39700","shortText":"G"}"##;
        let descriptor: RouteDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.color.as_str(), "#F39700");
        assert_eq!(descriptor.short_text, "G");
        assert_eq!(serde_json::to_string(&descriptor).unwrap(), json);
    }

    #[test]
    fn descriptor_rejects_invalid_color() {
        let json = r#"{"color":"gold","shortText":"G"}"#;
        assert!(serde_json::from_str::<RouteDescriptor>(json).is_err());
    }

    #[test]
    fn wide_badges() {
        let color = RouteColor::parse("#9ACD32").unwrap();
        assert!(RouteDescriptor::new(color.clone(), "JY").is_wide());
        assert!(!RouteDescriptor::new(color, "G").is_wide());
    }

    #[test]
    fn route_ref_json() {
        let json = r#"{"companyName":"東京地下鉄","routeName":"南北線"}"#;
        let route: RouteRef = serde_json::from_str(json).unwrap();
        assert_eq!(route, RouteRef::new("東京地下鉄", "南北線"));
        assert_eq!(route.to_string(), "東京地下鉄 南北線");
    }
}
