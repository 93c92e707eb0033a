use crate::domain::errors::{SlugError, SlugResult};
use crate::domain::slug::value_objects::FieldName;
use serde::{Deserialize, Serialize};

/// Substitutions applied before transliteration. Keys are matched against the
/// lowercased source text, so they are stored lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerOptions {
    pub substitutions: Vec<(String, String)>,
}

impl NormalizerOptions {
    pub fn new<K, V>(substitutions: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            substitutions: substitutions
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into()))
                .filter(|(k, _)| !k.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }
}

/// Scalar a collection view can be filtered on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FilterValue {
    pub fn matches(&self, value: Option<&serde_json::Value>) -> bool {
        match (self, value) {
            (FilterValue::Bool(expected), Some(serde_json::Value::Bool(actual))) => {
                expected == actual
            }
            (FilterValue::Int(expected), Some(serde_json::Value::Number(actual))) => {
                actual.as_i64() == Some(*expected)
            }
            (FilterValue::Text(expected), Some(serde_json::Value::String(actual))) => {
                expected == actual
            }
            _ => false,
        }
    }
}

/// The scope collisions are checked against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionView {
    /// Every stored record of the schema.
    #[default]
    All,
    /// Only records whose `field` equals `value`, e.g. published pages.
    Where { field: FieldName, value: FilterValue },
}

impl CollectionView {
    pub fn filtered(field: FieldName, value: impl Into<FilterValue>) -> Self {
        CollectionView::Where {
            field,
            value: value.into(),
        }
    }

    pub fn contains(&self, fields: &serde_json::Map<String, serde_json::Value>) -> bool {
        match self {
            CollectionView::All => true,
            CollectionView::Where { field, value } => value.matches(fields.get(field.as_str())),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

/// What to do when the origin text normalizes to nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySlugPolicy {
    /// Fail the save with `SlugError::EmptySlug`.
    #[default]
    Reject,
    /// Resolve against a fixed base instead, e.g. `untitled`, `untitled-1`.
    Fallback(String),
    /// Resolve the counter alone: `-1`, `-2`, ...
    CounterOnly,
}

/// Immutable per-field configuration, fixed when the schema is declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugFieldConfig {
    field: FieldName,
    origin: Option<FieldName>,
    force_recompute: bool,
    preserve_unicode: bool,
    normalizer: NormalizerOptions,
    view: CollectionView,
    empty_policy: EmptySlugPolicy,
}

impl SlugFieldConfig {
    pub fn builder(field: FieldName) -> SlugFieldConfigBuilder {
        SlugFieldConfigBuilder::new(field)
    }

    pub fn field(&self) -> &FieldName {
        &self.field
    }

    /// The field supplying source text; the slug field itself when unset.
    pub fn origin(&self) -> &FieldName {
        self.origin.as_ref().unwrap_or(&self.field)
    }

    pub fn force_recompute(&self) -> bool {
        self.force_recompute
    }

    pub fn preserve_unicode(&self) -> bool {
        self.preserve_unicode
    }

    pub fn normalizer(&self) -> &NormalizerOptions {
        &self.normalizer
    }

    pub fn view(&self) -> &CollectionView {
        &self.view
    }

    pub fn empty_policy(&self) -> &EmptySlugPolicy {
        &self.empty_policy
    }
}

pub struct SlugFieldConfigBuilder {
    field: FieldName,
    origin: Option<FieldName>,
    force_recompute: bool,
    preserve_unicode: bool,
    normalizer: NormalizerOptions,
    view: CollectionView,
    empty_policy: EmptySlugPolicy,
}

impl SlugFieldConfigBuilder {
    fn new(field: FieldName) -> Self {
        Self {
            field,
            origin: None,
            force_recompute: false,
            preserve_unicode: true,
            normalizer: NormalizerOptions::default(),
            view: CollectionView::All,
            empty_policy: EmptySlugPolicy::Reject,
        }
    }

    pub fn origin(mut self, origin: FieldName) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn force_recompute(mut self, force: bool) -> Self {
        self.force_recompute = force;
        self
    }

    pub fn preserve_unicode(mut self, preserve: bool) -> Self {
        self.preserve_unicode = preserve;
        self
    }

    pub fn normalizer(mut self, options: NormalizerOptions) -> Self {
        self.normalizer = options;
        self
    }

    pub fn view(mut self, view: CollectionView) -> Self {
        self.view = view;
        self
    }

    pub fn empty_policy(mut self, policy: EmptySlugPolicy) -> Self {
        self.empty_policy = policy;
        self
    }

    pub fn build(self) -> SlugResult<SlugFieldConfig> {
        if let EmptySlugPolicy::Fallback(base) = &self.empty_policy
            && base.trim().is_empty()
        {
            return Err(SlugError::InvalidConfig(format!(
                "fallback base for `{}` cannot be empty",
                self.field
            )));
        }
        if let CollectionView::Where { field, .. } = &self.view
            && field == &self.field
        {
            return Err(SlugError::InvalidConfig(format!(
                "`{}` cannot filter its own collection view",
                self.field
            )));
        }

        Ok(SlugFieldConfig {
            field: self.field,
            origin: self.origin,
            force_recompute: self.force_recompute,
            preserve_unicode: self.preserve_unicode,
            normalizer: self.normalizer,
            view: self.view,
            empty_policy: self.empty_policy,
        })
    }
}
