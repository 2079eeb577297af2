use serde::{Deserialize, Deserializer};

/// A field of a partial update
///
/// Presence is carried explicitly so that a legitimate zero or default
/// value is never confused with "not supplied". Use with
/// `#[serde(default)]` so a missing key deserialises to `Absent` and an
/// explicit `null` to `Null`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// The caller did not mention the field
    #[default]
    Absent,
    /// The caller sent the field with no value
    Null,
    /// The caller sent a value
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// `Null` counts as present: the caller did say something about the field
    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(value) => Patch::Value(f(value)),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    /// `Some` is a value and `None` an explicit null
    fn from(value: Option<T>) -> Self {
        value.map_or(Patch::Null, Patch::Value)
    }
}

impl<T> From<poem_openapi::types::MaybeUndefined<T>> for Patch<T> {
    fn from(value: poem_openapi::types::MaybeUndefined<T>) -> Self {
        use poem_openapi::types::MaybeUndefined;
        match value {
            MaybeUndefined::Undefined => Patch::Absent,
            MaybeUndefined::Null => Patch::Null,
            MaybeUndefined::Value(value) => Patch::Value(value),
        }
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
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}
