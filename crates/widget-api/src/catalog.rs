//! Service catalog types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-negative decimal amount, kept as canonical text.
///
/// The backend sends prices either as JSON numbers or as decimal strings
/// (`"1500.00"`). Trailing fractional zeros are dropped on parse, so both
/// forms display the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Price(String);

/// Largest decimal exponent accepted in a price such as `1e20`.
const MAX_EXPONENT: i64 = 64;

impl Price {
    pub fn zero() -> Self {
        Price("0".to_string())
    }

    /// Parse a decimal such as `1500`, `99.50`, `0.5` or `1.5e3`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (mantissa, exponent) = match text.find(['e', 'E']) {
            Some(at) => (&text[..at], text[at + 1..].parse::<i64>().ok()?),
            None => (text, 0),
        };
        if exponent.abs() > MAX_EXPONENT {
            return None;
        }
        let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !digits(whole) || !digits(frac) {
            return None;
        }

        // move the decimal point `exponent` places to the right
        let mut all = format!("{whole}{frac}");
        let mut point = whole.len() as i64 + exponent;
        if point < 0 {
            all.insert_str(0, &"0".repeat(point.unsigned_abs() as usize));
            point = 0;
        }
        let point = point as usize;
        if point > all.len() {
            all.push_str(&"0".repeat(point - all.len()));
        }
        let (whole, frac) = all.split_at(point);

        let whole = whole.trim_start_matches('0');
        let whole = if whole.is_empty() { "0" } else { whole };
        let frac = frac.trim_end_matches('0');
        Some(if frac.is_empty() {
            Price(whole.to_string())
        } else {
            Price(format!("{whole}.{frac}"))
        })
    }

    fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        match value {
            serde_json::Value::Null => Ok(Price::zero()),
            serde_json::Value::Number(n) => {
                Price::parse(&n.to_string()).ok_or_else(|| format!("invalid price {n}"))
            }
            serde_json::Value::String(s) if s.trim().is_empty() => Ok(Price::zero()),
            serde_json::Value::String(s) => {
                Price::parse(s).ok_or_else(|| format!("invalid price {s:?}"))
            }
            other => Err(format!("invalid price {other}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Price::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// Identifier that may arrive as a JSON number or string.
pub(crate) fn id_from_json(value: &serde_json::Value) -> Result<String, String> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("invalid id {other}")),
    }
}

#[derive(Deserialize)]
struct RawService {
    id: serde_json::Value,
    #[serde(default)]
    title: String,
    #[serde(default)]
    price: serde_json::Value,
    #[serde(default)]
    tour_widget: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    service_type: Option<String>,
    #[serde(default)]
    is_available: Option<bool>,
}

/// A bookable service as returned by `GET /services/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawService")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub price: Price,
    /// Untrusted tour markup. Never render it outside an isolated surface.
    pub tour_fragment: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub service_type: Option<String>,
    pub is_available: Option<bool>,
}

impl TryFrom<RawService> for Service {
    type Error = String;

    fn try_from(raw: RawService) -> Result<Self, Self::Error> {
        Ok(Service {
            id: id_from_json(&raw.id)?,
            title: raw.title,
            price: Price::from_json(&raw.price)?,
            tour_fragment: raw.tour_widget,
            description: raw.description,
            photo_url: raw.photo_url,
            service_type: raw.service_type,
            is_available: raw.is_available,
        })
    }
}

impl Service {
    /// Selector text, e.g. `City Tour — 1500 ₽`.
    pub fn display_label(&self) -> String {
        format!("{} — {} ₽", self.title, self.price)
    }

    /// The tour fragment when it holds anything but whitespace.
    pub fn tour(&self) -> Option<&str> {
        self.tour_fragment
            .as_deref()
            .filter(|fragment| !fragment.trim().is_empty())
    }

    pub fn has_tour(&self) -> bool {
        self.tour().is_some()
    }
}

/// Services in the order the backend listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    /// First service with the given id.
    pub fn get(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn first(&self) -> Option<&Service> {
        self.services.first()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl<'a> IntoIterator for &'a ServiceCatalog {
    type Item = &'a Service;
    type IntoIter = std::slice::Iter<'a, Service>;

    fn into_iter(self) -> Self::IntoIter {
        self.services.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_display_label() {
        let service: Service =
            serde_json::from_value(json!({"id": "1", "title": "City Tour", "price": 1500, "tour_widget": ""}))
                .unwrap();
        assert_eq!(service.display_label(), "City Tour — 1500 ₽");
        assert!(!service.has_tour());
    }

    #[test]
    fn test_price_forms() {
        for (raw, expected) in [
            (json!("1500.00"), "1500"),
            (json!("99.50"), "99.5"),
            (json!(1500.0), "1500"),
            (json!(0.5), "0.5"),
            (json!(null), "0"),
            (json!("007"), "7"),
        ] {
            assert_eq!(Price::from_json(&raw).unwrap().as_str(), expected, "{raw}");
        }
        assert!(Price::from_json(&json!(-5)).is_err());
        assert!(Price::from_json(&json!("12,5")).is_err());
        assert!(Price::from_json(&json!(true)).is_err());
    }

    #[test]
    fn test_exponent_prices() {
        for (raw, expected) in [
            (json!(1e20), "100000000000000000000"),
            (json!("1.5e3"), "1500"),
            (json!("2.5E-1"), "0.25"),
            (json!("15e-1"), "1.5"),
            (json!("0e5"), "0"),
        ] {
            assert_eq!(Price::from_json(&raw).unwrap().as_str(), expected, "{raw}");
        }
        assert!(Price::parse("1e").is_none());
        assert!(Price::parse("1e999").is_none());
    }

    #[test]
    fn test_catalog_with_exponent_price_loads() {
        let catalog: ServiceCatalog = serde_json::from_str(
            r#"[{"id": 1, "title": "Charter", "price": 1e20}, {"id": 2, "title": "Walk", "price": 300}]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get("1").unwrap().display_label(),
            "Charter — 100000000000000000000 ₽"
        );
    }

    #[test]
    fn test_numeric_id_and_missing_price() {
        let service: Service = serde_json::from_value(json!({"id": 42, "title": "Kayak"})).unwrap();
        assert_eq!(service.id, "42");
        assert_eq!(service.price, Price::zero());
        assert!(service.tour_fragment.is_none());
    }

    #[test]
    fn test_whitespace_fragment_is_no_tour() {
        let service: Service =
            serde_json::from_value(json!({"id": 1, "title": "T", "tour_widget": "  \n "})).unwrap();
        assert!(service.tour().is_none());

        let service: Service = serde_json::from_value(
            json!({"id": 2, "title": "T", "tour_widget": "<iframe src=\"https://tour.test\"></iframe>"}),
        )
        .unwrap();
        assert!(service.has_tour());
    }

    #[test]
    fn test_catalog_lookup_and_order() {
        let catalog: ServiceCatalog = serde_json::from_value(json!([
            {"id": 3, "title": "C", "price": "10.00", "is_available": true},
            {"id": 1, "title": "A", "price": 5}
        ]))
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.first().map(|s| s.id.as_str()), Some("3"));
        assert_eq!(catalog.get("1").map(|s| s.title.as_str()), Some("A"));
        assert!(catalog.get("2").is_none());
        assert_eq!(catalog.iter().count(), 2);
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let result: Result<Service, _> = serde_json::from_value(json!({"id": null, "title": "x"}));
        assert!(result.is_err());
    }
}
