//! Tri-state field for partial updates

use serde::{Deserialize, Deserializer};

/// A field of a partial-update request that distinguishes "not provided"
/// from "provided as null" from "provided with a value".
///
/// Combine with `#[serde(default)]`: an absent key deserializes to
/// `Missing`, an explicit `null` to `Clear`, and anything else to `Set`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Patch<T> {
    /// Field absent from the request; keep the stored value
    #[default]
    Missing,
    /// Field explicitly set to null; clear the stored value
    Clear,
    /// Field set to a new value
    Set(T),
}

impl<T> Patch<T> {
    /// Apply this patch to an optional slot
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Patch::Missing => {}
            Patch::Clear => *slot = None,
            Patch::Set(value) => *slot = Some(value),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(default)]
    struct Body {
        bio: Patch<String>,
    }

    impl Default for Body {
        fn default() -> Self {
            Body {
                bio: Patch::Missing,
            }
        }
    }

    #[test]
    fn test_absent_is_missing() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.bio, Patch::Missing);
    }

    #[test]
    fn test_null_is_clear() {
        let body: Body = serde_json::from_str(r#"{"bio": null}"#).unwrap();
        assert_eq!(body.bio, Patch::Clear);
    }

    #[test]
    fn test_value_is_set() {
        let body: Body = serde_json::from_str(r#"{"bio": "hello"}"#).unwrap();
        assert_eq!(body.bio, Patch::Set("hello".to_string()));
    }

    #[test]
    fn test_apply() {
        let mut slot = Some("old".to_string());
        Patch::Missing.apply(&mut slot);
        assert_eq!(slot.as_deref(), Some("old"));

        Patch::Set("new".to_string()).apply(&mut slot);
        assert_eq!(slot.as_deref(), Some("new"));

        Patch::<String>::Clear.apply(&mut slot);
        assert_eq!(slot, None);
    }
}
