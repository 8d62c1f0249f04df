use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::{
    OffsetStrategy,
    domain::DEFAULT_OFFSET_SECS,
    error::{ModelError, ModelResult},
};

/// Configuration snapshot consumed when the offset engine is built.
///
/// All fields are optional in the serialized form:
/// ```json
/// {
///   "defaultOffsetSeconds": 30,
///   "taskDurationToOffsetSteps": { "60": 10, "3600": 300 },
///   "strategyKindPerQueueOrTaskType": { "HTTP": "BACKOFF_TO_DEFAULT" },
///   "defaultStrategy": "CONSTANT"
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct OffsetConfig {
    /// Base/ceiling offset shared by the constant, backoff and queue-scaled strategies.
    #[serde(rename = "defaultOffsetSeconds")]
    pub default_offset_secs: u64,
    /// Duration threshold (seconds) to offset (seconds). Input order is irrelevant.
    pub task_duration_to_offset_steps: BTreeMap<u64, u64>,
    /// Strategy selected for each queue or task type.
    #[serde(rename = "strategyKindPerQueueOrTaskType")]
    pub strategies: BTreeMap<String, OffsetStrategy>,
    /// Strategy used for queue types that are not listed in `strategies`.
    pub default_strategy: OffsetStrategy,
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self {
            default_offset_secs: DEFAULT_OFFSET_SECS,
            task_duration_to_offset_steps: BTreeMap::new(),
            strategies: BTreeMap::new(),
            default_strategy: OffsetStrategy::default(),
        }
    }
}

impl OffsetConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> ModelResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON document from raw bytes.
    pub fn from_json_slice(b: &[u8]) -> ModelResult<Self> {
        let cfg: Self = serde_json::from_slice(b)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check structural constraints that serde cannot express.
    pub fn validate(&self) -> ModelResult<()> {
        if let Some(key) = self.strategies.keys().find(|k| k.trim().is_empty()) {
            return Err(ModelError::Invalid(format!(
                "queue or task type must not be blank: {key:?}"
            )));
        }
        Ok(())
    }

    /// Default offset as a [`Duration`].
    #[inline]
    pub fn default_offset(&self) -> Duration {
        Duration::from_secs(self.default_offset_secs)
    }

    /// Strategy configured for the queue or task type, falling back to `default_strategy`.
    pub fn strategy_for(&self, queue_type: &str) -> OffsetStrategy {
        self.strategies
            .get(queue_type)
            .copied()
            .unwrap_or(self.default_strategy)
    }

    /// Every strategy this configuration can select, without duplicates.
    pub fn referenced_strategies(&self) -> Vec<OffsetStrategy> {
        let mut out: Vec<_> = self
            .strategies
            .values()
            .copied()
            .chain(std::iter::once(self.default_strategy))
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Builder-style setter for the per-queue strategy map.
    pub fn with_strategy(mut self, queue_type: impl Into<String>, strategy: OffsetStrategy) -> Self {
        self.strategies.insert(queue_type.into(), strategy);
        self
    }

    /// Builder-style setter for a single duration step.
    pub fn with_step(mut self, threshold_secs: u64, offset_secs: u64) -> Self {
        self.task_duration_to_offset_steps
            .insert(threshold_secs, offset_secs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = OffsetConfig::default();

        assert_eq!(cfg.default_offset_secs, 30);
        assert_eq!(cfg.default_offset(), Duration::from_secs(30));
        assert!(cfg.task_duration_to_offset_steps.is_empty());
        assert!(cfg.strategies.is_empty());
        assert_eq!(cfg.default_strategy, OffsetStrategy::Constant);
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let cfg = OffsetConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, OffsetConfig::default());
    }

    #[test]
    fn parses_full_document() {
        let json = r#"{
            "defaultOffsetSeconds": 5,
            "taskDurationToOffsetSteps": { "30": 120, "10": 30, "20": 60 },
            "strategyKindPerQueueOrTaskType": {
                "HTTP": "BACKOFF_TO_DEFAULT",
                "WAIT": "SCALED_BY_TASK_DURATION",
                "JOIN": "CONSTANT_DEFAULT_OFFSET"
            },
            "defaultStrategy": "SCALED_BY_QUEUE_SIZE"
        }"#;
        let cfg = OffsetConfig::from_json_str(json).unwrap();

        assert_eq!(cfg.default_offset_secs, 5);
        assert_eq!(cfg.task_duration_to_offset_steps.len(), 3);
        assert_eq!(cfg.task_duration_to_offset_steps.get(&20), Some(&60));
        assert_eq!(cfg.strategy_for("HTTP"), OffsetStrategy::BackoffToDefault);
        assert_eq!(cfg.strategy_for("WAIT"), OffsetStrategy::ScaledByTaskDuration);
        assert_eq!(cfg.strategy_for("JOIN"), OffsetStrategy::Constant);
        assert_eq!(cfg.strategy_for("OTHER"), OffsetStrategy::ScaledByQueueSize);
    }

    #[test]
    fn rejects_unknown_strategy() {
        let json = r#"{ "strategyKindPerQueueOrTaskType": { "HTTP": "UNKNOWN_KIND" } }"#;
        let err = OffsetConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn rejects_negative_offsets() {
        let json = r#"{ "defaultOffsetSeconds": -1 }"#;
        assert!(OffsetConfig::from_json_slice(json.as_bytes()).is_err());
    }

    #[test]
    fn rejects_blank_queue_type() {
        let cfg = OffsetConfig::default().with_strategy("  ", OffsetStrategy::Constant);
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn referenced_strategies_are_deduplicated() {
        let cfg = OffsetConfig::default()
            .with_strategy("a", OffsetStrategy::BackoffToDefault)
            .with_strategy("b", OffsetStrategy::BackoffToDefault)
            .with_strategy("c", OffsetStrategy::Constant);

        assert_eq!(
            cfg.referenced_strategies(),
            vec![OffsetStrategy::Constant, OffsetStrategy::BackoffToDefault]
        );
    }

    #[cfg(feature = "schema")]
    #[test]
    fn json_schema_uses_serialized_names() {
        let schema = serde_json::to_value(schemars::schema_for!(OffsetConfig)).unwrap();
        let props = schema["properties"].as_object().expect("object schema");

        for key in [
            "defaultOffsetSeconds",
            "taskDurationToOffsetSteps",
            "strategyKindPerQueueOrTaskType",
            "defaultStrategy",
        ] {
            assert!(props.contains_key(key), "missing {key} in {schema}");
        }
        assert!(schema.to_string().contains("SCALED_BY_TASK_DURATION"), "{schema}");
    }

    #[test]
    fn builder_inserts_steps() {
        let cfg = OffsetConfig::default().with_step(10, 30).with_step(20, 60);
        assert_eq!(
            cfg.task_duration_to_offset_steps.into_iter().collect::<Vec<_>>(),
            vec![(10, 30), (20, 60)]
        );
    }
}
