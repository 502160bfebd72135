//! Tracked product records as served by `GET /products`.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One observed product price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub price: f64,
    /// Price before the last change, if the service recorded one.
    #[serde(default, deserialize_with = "deserialize_previous_price")]
    pub previous_price: Option<f64>,
    pub shop: String,
    /// Absolute URL of the product page, kept verbatim.
    #[serde(deserialize_with = "deserialize_absolute_url")]
    pub link: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_seen: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub first_seen: DateTime<Utc>,
    pub notified: bool,
}

impl Product {
    /// Display key: price, link and name concatenated.
    ///
    /// Two observations agreeing on all three fields share a key.
    pub fn row_id(&self) -> String {
        format!("{}{}{}", self.price, self.link, self.name)
    }

    /// The link as a parsed URL.
    pub fn url(&self) -> Option<reqwest::Url> {
        reqwest::Url::parse(&self.link).ok()
    }
}

/// `previousPrice` arrives either as a plain number or as the service's
/// nullable wrapper `{"Int64": n, "Valid": bool}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPreviousPrice {
    Plain(f64),
    Wrapped {
        #[serde(rename = "Int64")]
        value: f64,
        #[serde(rename = "Valid")]
        valid: bool,
    },
}

fn deserialize_previous_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawPreviousPrice> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawPreviousPrice::Plain(value)) => Some(value),
        Some(RawPreviousPrice::Wrapped { value, valid: true }) => Some(value),
        Some(RawPreviousPrice::Wrapped { valid: false, .. }) | None => None,
    })
}

fn deserialize_absolute_url<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let link = String::deserialize(deserializer)?;
    reqwest::Url::parse(&link)
        .map_err(|e| serde::de::Error::custom(format!("invalid link '{}': {}", link, e)))?;
    Ok(link)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    EpochMillis(i64),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", text, e))),
        RawTimestamp::EpochMillis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", ms))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_json() -> serde_json::Value {
        json!({
            "name": "Lightning Bolt",
            "price": 1250,
            "previousPrice": {"Int64": 1500, "Valid": true},
            "shop": "Card Corner",
            "link": "https://cards.example.com/bolt",
            "lastSeen": "2024-03-01T12:00:00Z",
            "firstSeen": "2024-02-01T08:30:00+01:00",
            "notified": false
        })
    }

    #[test]
    fn test_deserialize_service_shape() {
        let product: Product = serde_json::from_value(base_json()).unwrap();
        assert_eq!(product.name, "Lightning Bolt");
        assert_eq!(product.price, 1250.0);
        assert_eq!(product.previous_price, Some(1500.0));
        assert_eq!(product.shop, "Card Corner");
        assert_eq!(
            product.last_seen,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(
            product.first_seen,
            Utc.with_ymd_and_hms(2024, 2, 1, 7, 30, 0).unwrap()
        );
        assert!(!product.notified);
    }

    #[test]
    fn test_previous_price_variants() {
        let cases = [
            (json!({"Int64": 0, "Valid": false}), None),
            (json!(null), None),
            (json!(999.5), Some(999.5)),
        ];
        for (raw, expected) in cases {
            let mut value = base_json();
            value["previousPrice"] = raw;
            let product: Product = serde_json::from_value(value).unwrap();
            assert_eq!(product.previous_price, expected);
        }

        let mut value = base_json();
        value.as_object_mut().unwrap().remove("previousPrice");
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.previous_price, None);
    }

    #[test]
    fn test_epoch_millis_timestamp() {
        let mut value = base_json();
        value["lastSeen"] = json!(1_700_000_000_000i64);
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.last_seen.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_invalid_timestamp_rejected() {
        let mut value = base_json();
        value["lastSeen"] = json!("yesterday-ish");
        assert!(serde_json::from_value::<Product>(value).is_err());
    }

    #[test]
    fn test_relative_link_rejected() {
        let mut value = base_json();
        value["link"] = json!("/products/bolt");
        assert!(serde_json::from_value::<Product>(value).is_err());
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut value = base_json();
        value.as_object_mut().unwrap().remove("shop");
        assert!(serde_json::from_value::<Product>(value).is_err());
    }

    #[test]
    fn test_row_id_concatenates_price_link_name() {
        let product: Product = serde_json::from_value(base_json()).unwrap();
        assert_eq!(
            product.row_id(),
            "1250https://cards.example.com/boltLightning Bolt"
        );
        assert_eq!(product.url().unwrap().host_str(), Some("cards.example.com"));
    }

    #[test]
    fn test_row_id_is_not_unique() {
        let a: Product = serde_json::from_value(base_json()).unwrap();
        let mut b = a.clone();
        b.shop = "Other Shop".to_string();
        assert_ne!(a, b);
        assert_eq!(a.row_id(), b.row_id());
    }
}
