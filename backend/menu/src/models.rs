use std::{
    fmt::{self, Display},
    iter::Sum,
    ops::Add,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

use crate::error::ValidationError;

/// Non-negative amount of money, kept in whole cents so topping sums stay exact.
///
/// On the wire it is a plain decimal number of dollars (`4.5`, `0.75`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Self = Self(0);
    /// Largest amount accepted from the wire, $1,000,000.00.
    pub const MAX: Self = Self(100_000_000);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// `None` for negative, NaN or infinite amounts and anything above [`Price::MAX`].
    pub fn from_dollars(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }

        let cents = (amount * 100.0).round();
        if cents > Self::MAX.0 as f64 {
            return None;
        }

        Some(Self(cents as u64))
    }

    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;

        Self::from_dollars(amount)
            .ok_or_else(|| D::Error::custom(format!("invalid price {amount}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
}

impl MenuItem {
    /// Items are addressed by name, or by id when the data carries one.
    pub fn answers_to(&self, key: &str) -> bool {
        self.name == key || self.id.as_deref() == Some(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToppingOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(format!("unknown size {other:?}")),
        }
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        };

        f.write_str(label)
    }
}

/// Enumerated option set served by `/customizations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationCatalog {
    #[serde(default)]
    pub ice_levels: Vec<String>,
    #[serde(default)]
    pub sugar_levels: Vec<String>,
    #[serde(default)]
    pub toppings: Vec<ToppingOption>,
}

impl CustomizationCatalog {
    pub fn topping(&self, key: &str) -> Option<&ToppingOption> {
        self.toppings
            .iter()
            .find(|topping| topping.name == key || topping.id.as_deref() == Some(key))
    }

    /// Builds a selection out of catalog values. Toppings are copied, so later
    /// catalog changes never reach an existing selection. Repeated toppings
    /// count once.
    pub fn select<S: AsRef<str>>(
        &self,
        ice_level: &str,
        sugar_level: &str,
        toppings: &[S],
        size: Option<Size>,
    ) -> Result<CustomizationSelection, ValidationError> {
        if !self.ice_levels.iter().any(|level| level == ice_level) {
            return Err(ValidationError::UnknownIceLevel(ice_level.to_string()));
        }

        if !self.sugar_levels.iter().any(|level| level == sugar_level) {
            return Err(ValidationError::UnknownSugarLevel(sugar_level.to_string()));
        }

        let mut chosen: Vec<ToppingOption> = Vec::with_capacity(toppings.len());
        for key in toppings {
            let key = key.as_ref();
            let topping = self
                .topping(key)
                .ok_or_else(|| ValidationError::UnknownTopping(key.to_string()))?;

            if !chosen.contains(topping) {
                chosen.push(topping.clone());
            }
        }

        Ok(CustomizationSelection {
            ice_level: ice_level.to_string(),
            sugar_level: sugar_level.to_string(),
            toppings: chosen,
            size,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationSelection {
    pub ice_level: String,
    pub sugar_level: String,
    #[serde(default)]
    pub toppings: Vec<ToppingOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl CustomizationSelection {
    pub fn toppings_total(&self) -> Price {
        self.toppings.iter().map(|topping| topping.price).sum()
    }
}

/// A priced cart entry. `final_price` is always the base price plus the
/// toppings captured in its own customization; it is recomputed on load
/// rather than trusted from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LineItemRecord")]
pub struct LineItem {
    #[serde(flatten)]
    item: MenuItem,
    #[serde(rename = "finalPrice")]
    final_price: Price,
    customization: CustomizationSelection,
}

#[derive(Deserialize)]
struct LineItemRecord {
    #[serde(flatten)]
    item: MenuItem,
    customization: CustomizationSelection,
}

impl From<LineItemRecord> for LineItem {
    fn from(record: LineItemRecord) -> Self {
        Self::new(record.item, record.customization)
    }
}

impl LineItem {
    pub fn new(item: MenuItem, customization: CustomizationSelection) -> Self {
        let final_price = item.price + customization.toppings_total();

        Self {
            item,
            final_price,
            customization,
        }
    }

    pub const fn item(&self) -> &MenuItem {
        &self.item
    }

    pub const fn final_price(&self) -> Price {
        self.final_price
    }

    pub const fn customization(&self) -> &CustomizationSelection {
        &self.customization
    }
}

impl Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} (Ice: {}, Sugar: {}",
            self.item.name,
            self.final_price,
            self.customization.ice_level,
            self.customization.sugar_level
        )?;

        if let Some(size) = self.customization.size {
            write!(f, ", Size: {size}")?;
        }

        if !self.customization.toppings.is_empty() {
            let names: Vec<&str> = self
                .customization
                .toppings
                .iter()
                .map(|topping| topping.name.as_str())
                .collect();
            write!(f, ", Toppings: {}", names.join(", "))?;
        }

        f.write_str(")")
    }
}

pub fn order_total(items: &[LineItem]) -> Price {
    items.iter().map(LineItem::final_price).sum()
}

/// Star rating; accepted as a number or a numeric string since form posts send text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rating(pub u8);

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u8),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Self(value)),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| D::Error::custom(format!("invalid rating {text:?}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub name: String,
    pub rating: Rating,
    pub message: String,
}

impl Review {
    pub const MAX_RATING: u8 = 5;

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        if !(1..=Self::MAX_RATING).contains(&self.rating.0) {
            return Err(ValidationError::Rating(self.rating.0));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CustomizationCatalog {
        serde_json::from_str(
            r#"{
                "iceLevels": ["Regular Ice", "Less Ice", "No Ice"],
                "sugarLevels": ["100%", "50%", "0%"],
                "toppings": [
                    {"name": "Boba", "price": 0.75},
                    {"name": "Lychee Jelly", "price": 0.5}
                ]
            }"#,
        )
        .unwrap()
    }

    fn classic() -> MenuItem {
        MenuItem {
            id: None,
            name: "Classic".to_string(),
            price: Price::from_cents(450),
            image: Some("imgs/classic.png".to_string()),
            category: "Milk Tea".to_string(),
        }
    }

    #[test]
    fn test_price_parsing() {
        let price: Price = serde_json::from_str("4.50").unwrap();
        assert_eq!(price.cents(), 450);

        let price: Price = serde_json::from_str("3").unwrap();
        assert_eq!(price.cents(), 300);

        assert!(serde_json::from_str::<Price>("-1.0").is_err());
        assert!(serde_json::from_str::<Price>("1e300").is_err());
        assert_eq!(Price::from_dollars(1_000_000.0), Some(Price::MAX));
        assert_eq!(Price::from_dollars(1_000_000.01), None);
        assert_eq!(Price::from_cents(525).to_string(), "$5.25");
        assert_eq!(serde_json::to_string(&Price::from_cents(525)).unwrap(), "5.25");
    }

    #[test]
    fn test_final_price_includes_toppings() {
        let selection = catalog()
            .select("Less Ice", "50%", &["Boba", "Lychee Jelly"], None)
            .unwrap();
        let line = LineItem::new(classic(), selection);

        assert_eq!(line.final_price(), Price::from_cents(575));
    }

    #[test]
    fn test_final_price_survives_catalog_change() {
        let mut catalog = catalog();
        let selection = catalog.select("Less Ice", "50%", &["Boba"], None).unwrap();
        let line = LineItem::new(classic(), selection);

        catalog.toppings[0].price = Price::from_cents(200);

        assert_eq!(line.final_price(), Price::from_cents(525));
        assert_eq!(line.customization().toppings[0].price, Price::from_cents(75));
    }

    #[test]
    fn test_select_rejects_unknown_values() {
        let catalog = catalog();

        assert_eq!(
            catalog.select::<&str>("Extra Ice", "50%", &[], None),
            Err(ValidationError::UnknownIceLevel("Extra Ice".to_string()))
        );
        assert_eq!(
            catalog.select::<&str>("No Ice", "25%", &[], None),
            Err(ValidationError::UnknownSugarLevel("25%".to_string()))
        );
        assert_eq!(
            catalog.select("No Ice", "0%", &["Pudding"], None),
            Err(ValidationError::UnknownTopping("Pudding".to_string()))
        );
    }

    #[test]
    fn test_select_dedupes_toppings() {
        let selection = catalog()
            .select("No Ice", "0%", &["Boba", "Boba"], Some(Size::Large))
            .unwrap();

        assert_eq!(selection.toppings.len(), 1);
        assert_eq!(selection.toppings_total(), Price::from_cents(75));
    }

    #[test]
    fn test_line_item_wire_shape() {
        let selection = catalog()
            .select("Less Ice", "50%", &["Boba"], Some(Size::Medium))
            .unwrap();
        let line = LineItem::new(classic(), selection);
        let value = serde_json::to_value(&line).unwrap();

        assert_eq!(value["name"], "Classic");
        assert_eq!(value["price"], 4.5);
        assert_eq!(value["finalPrice"], 5.25);
        assert_eq!(value["customization"]["iceLevel"], "Less Ice");
        assert_eq!(value["customization"]["size"], "medium");
        assert_eq!(value["customization"]["toppings"][0]["name"], "Boba");
    }

    #[test]
    fn test_stored_final_price_is_recomputed() {
        let line: LineItem = serde_json::from_str(
            r#"{
                "name": "Classic",
                "price": 4.5,
                "finalPrice": 99.0,
                "customization": {
                    "iceLevel": "Less Ice",
                    "sugarLevel": "50%",
                    "toppings": [{"name": "Boba", "price": 0.75}]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(line.final_price(), Price::from_cents(525));
    }

    #[test]
    fn test_price_sums_saturate() {
        let huge = Price::from_cents(u64::MAX - 10);

        assert_eq!(huge + Price::from_cents(75), Price::from_cents(u64::MAX));
        assert_eq!(
            [huge, huge].into_iter().sum::<Price>(),
            Price::from_cents(u64::MAX)
        );
    }

    #[test]
    fn test_line_item_with_oversized_price_is_rejected() {
        let result = serde_json::from_str::<LineItem>(
            r#"{
                "name": "Classic",
                "price": 1e300,
                "customization": {
                    "iceLevel": "Less Ice",
                    "sugarLevel": "50%",
                    "toppings": [{"name": "Boba", "price": 0.75}]
                }
            }"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_rating_accepts_text() {
        let review: Review =
            serde_json::from_str(r#"{"name": "Ann", "rating": "4", "message": "good"}"#).unwrap();
        assert_eq!(review.rating, Rating(4));
        assert!(review.validate().is_ok());

        let review: Review =
            serde_json::from_str(r#"{"name": "Ann", "rating": 9, "message": ""}"#).unwrap();
        assert_eq!(review.validate(), Err(ValidationError::Rating(9)));

        assert!(
            serde_json::from_str::<Review>(r#"{"name": "Ann", "rating": "lots", "message": ""}"#)
                .is_err()
        );
    }

    #[test]
    fn test_line_item_display() {
        let selection = catalog()
            .select("Less Ice", "50%", &["Boba"], None)
            .unwrap();
        let line = LineItem::new(classic(), selection);

        assert_eq!(
            line.to_string(),
            "Classic - $5.25 (Ice: Less Ice, Sugar: 50%, Toppings: Boba)"
        );
    }
}
