use arbitrary::{Arbitrary, Unstructured};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Map from attribute names to JSON values, describing the formatting of a
/// range of a document (e.g. `{"bold": true, "color": "red"}`).
///
/// A `null` value is not the same as an absent key: under
/// [`compose`](Attributes::compose) and [`invert`](Attributes::invert) it
/// means *remove this attribute from the base*. Equality is structural and
/// deep on both keys and values. An empty map behaves exactly like an absent
/// one; the algebra below returns `None` rather than an empty map so that
/// absence stays the canonical form on the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Returns a new empty attribute map.
    pub fn new() -> Attributes {
        Attributes(Map::new())
    }

    /// Sets the value of the named attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns the value of the named attribute, if set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns whether the named attribute is set (possibly to `null`).
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of attributes in this map.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether this map has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the name and value pairs in this map.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    fn into_option(self) -> Option<Attributes> {
        (!self.is_empty()).then_some(self)
    }

    /// Overlays `b` onto `a`, with `b` winning at shared names.
    ///
    /// When `keep_null` is false, `b`'s `null` values are dropped from the
    /// result after they have erased `a`'s entries: the removal is applied
    /// immediately. The compose algorithm passes `keep_null = true` only
    /// when both sides are retains, so that the erasure survives to be
    /// composed further downstream.
    pub fn compose(
        a: Option<&Attributes>,
        b: Option<&Attributes>,
        keep_null: bool,
    ) -> Option<Attributes> {
        let mut merged = b.cloned().unwrap_or_default();

        if !keep_null {
            merged.0.retain(|_, value| !value.is_null());
        }

        if let Some(a) = a {
            for (name, value) in a.iter() {
                if !b.map_or(false, |b| b.contains(name)) {
                    merged.0.insert(name.clone(), value.clone());
                }
            }
        }

        merged.into_option()
    }

    /// Transforms `b` against a concurrent `a` applied to the same base.
    ///
    /// Without `priority`, `b` wins unconditionally. With `priority`, `a`'s
    /// attributes suppress `b`'s at shared names and only `b`'s remaining
    /// names survive.
    pub fn transform(
        a: Option<&Attributes>,
        b: Option<&Attributes>,
        priority: bool,
    ) -> Option<Attributes> {
        let Some(a) = a else {
            return b.cloned().and_then(Attributes::into_option);
        };
        let Some(b) = b else {
            return None;
        };

        if !priority {
            return b.clone().into_option();
        }

        let survivors = b
            .iter()
            .filter(|(name, _)| !a.contains(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Attributes(survivors).into_option()
    }

    /// Returns the map that, composed after `attr`, restores `base`.
    ///
    /// Names that `attr` changed carry their old base value; names that
    /// `attr` added carry `null` so the composition erases them. The result
    /// may be empty, which callers collapse to absence.
    pub fn invert(attr: Option<&Attributes>, base: Option<&Attributes>) -> Attributes {
        let empty = Attributes::new();
        let attr = attr.unwrap_or(&empty);
        let base = base.unwrap_or(&empty);

        let mut inverted = Attributes::new();
        for (name, value) in base.iter() {
            if attr.contains(name) && attr.get(name) != Some(value) {
                inverted.0.insert(name.clone(), value.clone());
            }
        }
        for (name, _) in attr.iter() {
            if !base.contains(name) {
                inverted.0.insert(name.clone(), Value::Null);
            }
        }

        inverted
    }
}

impl<N, V> FromIterator<(N, V)> for Attributes
where
    N: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
    {
        Attributes(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> Arbitrary<'a> for Attributes {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Attributes> {
        let mut attributes = Attributes::new();
        for name in ["bold", "italic", "color"] {
            match u.int_in_range::<u8>(0..=3)? {
                0 => {}
                1 => attributes.insert(name, true),
                2 => attributes.insert(name, "red"),
                _ => attributes.insert(name, Value::Null),
            }
        }
        Ok(attributes)
    }
}

/// Builds an [`Attributes`] map from `name => value` pairs.
///
/// ```
/// use quilt::attrs;
///
/// let attributes = attrs! { "bold" => true, "color" => "red" };
/// assert_eq!(attributes.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
    ($($name:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut attributes = $crate::Attributes::new();
        $(attributes.insert($name, $value);)*
        attributes
    }};
}
