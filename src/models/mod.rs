pub mod content;
pub mod order;
pub mod point;
pub mod session;

// Numeric columns arrive either as JSON numbers or as decimal strings.
pub(crate) mod decimal {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    fn parse<E: Error>(value: NumberOrString) -> Result<Option<f64>, E> {
        match value {
            NumberOrString::Number(number) => Ok(Some(number)),
            NumberOrString::Text(text) if text.trim().is_empty() => Ok(None),
            NumberOrString::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|err| E::custom(format!("invalid decimal {text:?}: {err}"))),
        }
    }

    pub fn required<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = NumberOrString::deserialize(deserializer)?;
        parse::<D::Error>(value)?.ok_or_else(|| D::Error::custom("missing decimal value"))
    }

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(value) => parse(value),
            None => Ok(None),
        }
    }
}
