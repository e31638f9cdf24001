//! Product rules shared by the admin write path: lifecycle status, slug and
//! variant SKU generation, and parsing of the `variants` form field.

use serde::Deserialize;

use crate::error::CoreError;

/// Image recorded for products created without an uploaded file.
pub const PLACEHOLDER_IMAGE_URL: &str = "/placeholder.svg?height=400&width=400";

/// Lifecycle status of a product. Only `Active` products are publicly listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStatus {
    Active,
    Inactive,
    OutOfStock,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [Self::Active, Self::Inactive, Self::OutOfStock];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OutOfStock => "out_of_stock",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value.trim())
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{value}'. Must be one of: active, inactive, out_of_stock"
                ))
            })
    }
}

/// Derive a URL slug from a product name.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `-`, and trims leading/trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// SKU for a single variant: `{base}-{size}-{COL}` where `COL` is the first
/// three characters of the color, uppercased.
pub fn variant_sku(base: &str, size: &str, color: &str) -> String {
    let color_code: String = color.chars().take(3).collect::<String>().to_uppercase();
    format!("{base}-{size}-{color_code}")
}

/// One entry of the `variants` JSON array submitted with the product form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVariant {
    size: Option<serde_json::Value>,
    color: Option<serde_json::Value>,
    stock_quantity: Option<serde_json::Value>,
}

/// A validated (size, color, stock) variant ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    pub size: String,
    pub color: String,
    pub stock_quantity: i32,
}

/// Parse the `variants` form field.
///
/// Entries lacking a size or color are skipped. Sizes and colors may be
/// strings or numbers. `stockQuantity` may be a number or a numeric string;
/// anything else counts as zero stock.
pub fn parse_variants(raw: Option<&str>) -> Result<Vec<VariantSpec>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(Vec::new());
    };
    let entries: Vec<RawVariant> = serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("variants must be a JSON array: {e}")))?;

    Ok(entries
        .into_iter()
        .filter_map(|v| {
            let size = label_from_json(v.size.as_ref())?;
            let color = label_from_json(v.color.as_ref())?;
            Some(VariantSpec {
                size,
                color,
                stock_quantity: stock_from_json(v.stock_quantity.as_ref()),
            })
        })
        .collect())
}

fn label_from_json(value: Option<&serde_json::Value>) -> Option<String> {
    let label = match value? {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!label.is_empty()).then_some(label)
}

fn stock_from_json(value: Option<&serde_json::Value>) -> i32 {
    let parsed = match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|n| i32::try_from(n).ok())
        .filter(|n| *n >= 0)
        .unwrap_or(0)
}

/// Parse a form checkbox: only the literal `"true"` is true.
pub fn parse_flag(value: &str) -> bool {
    value.trim() == "true"
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Classic White Sneakers"), "classic-white-sneakers");
        assert_eq!(slugify("  Urban Runner -- Pro!! "), "urban-runner-pro");
        assert_eq!(slugify("Oxford's #1 Shoe"), "oxford-s-1-shoe");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn variant_sku_uses_color_prefix() {
        assert_eq!(variant_sku("SNK-001", "42", "white"), "SNK-001-42-WHI");
        assert_eq!(variant_sku("B", "9", "re"), "B-9-RE");
    }

    #[test]
    fn status_round_trips_known_values() {
        for status in ProductStatus::ALL {
            assert_eq!(ProductStatus::parse(status.as_str()).unwrap(), status);
        }
        assert_matches!(ProductStatus::parse("deleted"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn parse_variants_skips_incomplete_entries() {
        let raw = r#"[
            {"size": "42", "color": "Black", "stockQuantity": 5},
            {"size": "43", "color": "", "stockQuantity": 2},
            {"color": "Red"},
            {"size": "44", "color": "Blue", "stockQuantity": "7"},
            {"size": "45", "color": "Green", "stockQuantity": "lots"}
        ]"#;
        let variants = parse_variants(Some(raw)).unwrap();
        assert_eq!(
            variants,
            vec![
                VariantSpec { size: "42".into(), color: "Black".into(), stock_quantity: 5 },
                VariantSpec { size: "44".into(), color: "Blue".into(), stock_quantity: 7 },
                VariantSpec { size: "45".into(), color: "Green".into(), stock_quantity: 0 },
            ]
        );
    }

    #[test]
    fn parse_variants_accepts_numeric_sizes() {
        let raw = r#"[{"size": 42, "color": "White", "stockQuantity": 3}, {"size": 9.5, "color": "Tan"}]"#;
        let variants = parse_variants(Some(raw)).unwrap();
        assert_eq!(variants[0].size, "42");
        assert_eq!(variants[0].stock_quantity, 3);
        assert_eq!(variants[1].size, "9.5");
        assert_eq!(variants[1].stock_quantity, 0);
    }

    #[test]
    fn parse_variants_skips_non_scalar_labels() {
        let raw = r#"[{"size": ["42"], "color": "Red"}, {"size": "41", "color": null}]"#;
        assert!(parse_variants(Some(raw)).unwrap().is_empty());
    }

    #[test]
    fn parse_variants_absent_is_empty() {
        assert!(parse_variants(None).unwrap().is_empty());
        assert!(parse_variants(Some("  ")).unwrap().is_empty());
    }

    #[test]
    fn parse_variants_rejects_invalid_json() {
        assert_matches!(parse_variants(Some("{not json")), Err(CoreError::Validation(_)));
    }

    #[test]
    fn negative_stock_counts_as_zero() {
        let variants = parse_variants(Some(r#"[{"size":"1","color":"Tan","stockQuantity":-3}]"#))
            .unwrap();
        assert_eq!(variants[0].stock_quantity, 0);
    }

    #[test]
    fn flag_requires_literal_true() {
        assert!(parse_flag("true"));
        assert!(!parse_flag("on"));
        assert!(!parse_flag("false"));
    }
}
