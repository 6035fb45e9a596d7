//! # Special Token Configuration

use serde::{Deserialize, Serialize};

/// Default surface form for the unknown-token slot.
pub const UNKNOWN_TOKEN: &str = "<unk>";

/// Default surface form for the padding slot.
pub const PADDING_TOKEN: &str = "<pad>";

/// Default surface form for the begin-of-sequence slot.
pub const BOS_TOKEN: &str = "<bos>";

/// Default surface form for the end-of-sequence slot.
pub const EOS_TOKEN: &str = "<eos>";

/// Per-vocabulary reserved-symbol configuration.
///
/// Each slot is independently nullable. Enabled slots are inserted ahead of
/// corpus tokens in the canonical order: unknown, padding, bos, eos;
/// disabled slots are skipped and the remaining slots stay dense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialTokens {
    /// Surface form of the unknown-token slot, if enabled.
    pub unknown: Option<String>,

    /// Surface form of the padding slot, if enabled.
    pub padding: Option<String>,

    /// Surface form of the begin-of-sequence slot, if enabled.
    pub bos: Option<String>,

    /// Surface form of the end-of-sequence slot, if enabled.
    pub eos: Option<String>,
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self {
            unknown: Some(UNKNOWN_TOKEN.into()),
            padding: Some(PADDING_TOKEN.into()),
            bos: Some(BOS_TOKEN.into()),
            eos: Some(EOS_TOKEN.into()),
        }
    }
}

impl SpecialTokens {
    /// Configuration with every slot disabled.
    pub fn none() -> Self {
        Self {
            unknown: None,
            padding: None,
            bos: None,
            eos: None,
        }
    }

    /// Role preset for input-token vocabularies: unknown + padding.
    ///
    /// Sentence-boundary framing is left to the batching collaborator.
    pub fn for_inputs() -> Self {
        Self::default().without_bos().without_eos()
    }

    /// Role preset for per-token label vocabularies: padding + bos + eos.
    ///
    /// Label sets are closed; the unknown slot is disabled.
    pub fn for_labels() -> Self {
        Self::default().without_unknown()
    }

    /// Role preset for class/intent vocabularies: no reserved symbols.
    ///
    /// Each example contributes exactly one whole-sequence label, so
    /// padding and sequence framing are meaningless.
    pub fn for_classes() -> Self {
        Self::none()
    }

    /// Sets the unknown-token surface form.
    pub fn with_unknown<S: Into<String>>(
        self,
        token: S,
    ) -> Self {
        Self {
            unknown: Some(token.into()),
            ..self
        }
    }

    /// Disables the unknown-token slot.
    pub fn without_unknown(self) -> Self {
        Self {
            unknown: None,
            ..self
        }
    }

    /// Sets the padding surface form.
    pub fn with_padding<S: Into<String>>(
        self,
        token: S,
    ) -> Self {
        Self {
            padding: Some(token.into()),
            ..self
        }
    }

    /// Disables the padding slot.
    pub fn without_padding(self) -> Self {
        Self {
            padding: None,
            ..self
        }
    }

    /// Sets the begin-of-sequence surface form.
    pub fn with_bos<S: Into<String>>(
        self,
        token: S,
    ) -> Self {
        Self {
            bos: Some(token.into()),
            ..self
        }
    }

    /// Disables the begin-of-sequence slot.
    pub fn without_bos(self) -> Self {
        Self { bos: None, ..self }
    }

    /// Sets the end-of-sequence surface form.
    pub fn with_eos<S: Into<String>>(
        self,
        token: S,
    ) -> Self {
        Self {
            eos: Some(token.into()),
            ..self
        }
    }

    /// Disables the end-of-sequence slot.
    pub fn without_eos(self) -> Self {
        Self { eos: None, ..self }
    }

    /// Enabled surface forms in canonical insertion order.
    pub fn in_order(&self) -> impl Iterator<Item = &str> {
        [&self.unknown, &self.padding, &self.bos, &self.eos]
            .into_iter()
            .filter_map(|slot| slot.as_deref())
    }

    /// The number of enabled slots.
    pub fn count(&self) -> usize {
        self.in_order().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let specials = SpecialTokens::default();
        assert_eq!(
            specials.in_order().collect::<Vec<_>>(),
            vec![UNKNOWN_TOKEN, PADDING_TOKEN, BOS_TOKEN, EOS_TOKEN]
        );
        assert_eq!(specials.count(), 4);
    }

    #[test]
    fn test_disabled_slots_stay_dense() {
        let specials = SpecialTokens::default().without_padding();
        assert_eq!(
            specials.in_order().collect::<Vec<_>>(),
            vec![UNKNOWN_TOKEN, BOS_TOKEN, EOS_TOKEN]
        );
        assert_eq!(specials.count(), 3);
    }

    #[test]
    fn test_role_presets() {
        let inputs = SpecialTokens::for_inputs();
        assert_eq!(
            inputs.in_order().collect::<Vec<_>>(),
            vec![UNKNOWN_TOKEN, PADDING_TOKEN]
        );

        let labels = SpecialTokens::for_labels();
        assert!(labels.unknown.is_none());
        assert_eq!(
            labels.in_order().collect::<Vec<_>>(),
            vec![PADDING_TOKEN, BOS_TOKEN, EOS_TOKEN]
        );

        assert_eq!(SpecialTokens::for_classes().count(), 0);
    }

    #[test]
    fn test_custom_surface_forms() {
        let specials = SpecialTokens::none().with_unknown("<|unk|>");
        assert_eq!(specials.in_order().collect::<Vec<_>>(), vec!["<|unk|>"]);
    }
}
