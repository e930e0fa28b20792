//! Ending resolution after a choice.
//!
//! Collapse is checked before sudden endings. Sudden endings only follow a
//! critical event. An option's typed outcome is authoritative; text markers
//! are consulted only when the option has none and the shim is enabled.

use tracing::info;

use reign_types::{
    AttributeKind, Attributes, Ending, EventInstance, EventKind, EventOption, SuddenReason,
};

use crate::config::{EndingConfig, ThresholdPolicy, pct_to_decimal};

/// First trait, in scan order, that breaches a threshold.
pub fn check_collapse(attrs: &Attributes, config: &EndingConfig) -> Option<AttributeKind> {
    let low = pct_to_decimal(config.low_threshold_pct);
    let high = pct_to_decimal(config.high_threshold_pct);
    AttributeKind::ALL.into_iter().find(|kind| {
        let value = attrs.trait_value(*kind);
        value < low || (config.threshold_policy == ThresholdPolicy::LowAndHigh && value > high)
    })
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| !k.is_empty() && text.contains(k.as_str()))
}

fn sudden_from_text(option: &EventOption, config: &EndingConfig) -> Option<SuddenReason> {
    if let Some(log) = option.log_text.as_deref() {
        if contains_any(log, &config.assassination_keywords) {
            return Some(SuddenReason::Assassination);
        }
        if contains_any(log, &config.rebellion_keywords) {
            return Some(SuddenReason::Rebellion);
        }
        return None;
    }
    if contains_any(&option.text, &config.assassination_keywords)
        || contains_any(&option.feedback, &config.assassination_keywords)
    {
        return Some(SuddenReason::Assassination);
    }
    if contains_any(&option.text, &config.rebellion_option_keywords)
        || contains_any(&option.feedback, &config.rebellion_keywords)
    {
        return Some(SuddenReason::Rebellion);
    }
    None
}

/// Sudden ending implied by choosing `option` on `event`, if any.
pub fn check_sudden(
    event: &EventInstance,
    option: &EventOption,
    config: &EndingConfig,
) -> Option<SuddenReason> {
    if event.kind != EventKind::Critical {
        return None;
    }
    if option.outcome.is_some() {
        return option.outcome;
    }
    if config.keyword_shim {
        sudden_from_text(option, config)
    } else {
        None
    }
}

/// Decide whether the reign ends after a choice, given the post-choice
/// attributes.
pub fn resolve_after_choice(
    attrs: &Attributes,
    event: &EventInstance,
    option: &EventOption,
    config: &EndingConfig,
) -> Option<Ending> {
    if let Some(reason) = check_collapse(attrs, config) {
        info!(?reason, value = %attrs.trait_value(reason), "reign collapsed");
        return Some(Ending::Collapse { reason });
    }
    check_sudden(event, option, config).map(|reason| {
        info!(?reason, event = %event.title, "sudden ending");
        Ending::Sudden { reason }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use reign_types::{AttributeDelta, EventId, OptionId, ReignStage};

    use super::*;

    fn option(text: &str, feedback: &str, log: Option<&str>) -> EventOption {
        EventOption {
            id: OptionId::new(),
            text: text.to_owned(),
            feedback: feedback.to_owned(),
            log_text: log.map(str::to_owned),
            attitude: None,
            delta: AttributeDelta::default(),
            outcome: None,
            effect: None,
        }
    }

    fn event(kind: EventKind) -> EventInstance {
        EventInstance {
            id: EventId::new(),
            title: "宫变".to_owned(),
            kind,
            category: None,
            description: String::new(),
            options: Vec::new(),
            is_processed: false,
            chosen_feedback: None,
            stage: ReignStage::EarlyReign,
        }
    }

    #[test]
    fn low_trait_collapses() {
        let mut attrs = Attributes::default();
        attrs.popularity = Decimal::new(5, 2);
        assert_eq!(
            check_collapse(&attrs, &EndingConfig::default()),
            Some(AttributeKind::Popularity)
        );
    }

    #[test]
    fn exact_threshold_does_not_collapse() {
        let mut attrs = Attributes::default();
        attrs.mood = Decimal::new(10, 2);
        attrs.charm = Decimal::new(90, 2);
        assert_eq!(check_collapse(&attrs, &EndingConfig::default()), None);
    }

    #[test]
    fn high_trait_depends_on_policy() {
        let mut attrs = Attributes::default();
        attrs.morality = Decimal::new(95, 2);
        assert_eq!(
            check_collapse(&attrs, &EndingConfig::default()),
            Some(AttributeKind::Morality)
        );
        let low_only = EndingConfig {
            threshold_policy: ThresholdPolicy::LowOnly,
            ..EndingConfig::default()
        };
        assert_eq!(check_collapse(&attrs, &low_only), None);
    }

    #[test]
    fn first_breach_in_scan_order_wins() {
        let mut attrs = Attributes::default();
        attrs.morality = Decimal::ZERO;
        attrs.mood = Decimal::ZERO;
        assert_eq!(
            check_collapse(&attrs, &EndingConfig::default()),
            Some(AttributeKind::Mood)
        );
    }

    #[test]
    fn typed_outcome_wins() {
        let mut opt = option("平定叛乱", "天下太平", Some("皇帝身亡"));
        opt.outcome = Some(SuddenReason::Rebellion);
        assert_eq!(
            check_sudden(&event(EventKind::Critical), &opt, &EndingConfig::default()),
            Some(SuddenReason::Rebellion)
        );
    }

    #[test]
    fn log_marker_means_assassination() {
        let opt = option("独自赴宴", "宴中有变", Some("皇帝遇刺身亡"));
        assert_eq!(
            check_sudden(&event(EventKind::Critical), &opt, &EndingConfig::default()),
            Some(SuddenReason::Assassination)
        );
    }

    #[test]
    fn log_marker_means_rebellion() {
        let opt = option("弃城而走", "大势已去", Some("王朝覆灭"));
        assert_eq!(
            check_sudden(&event(EventKind::Critical), &opt, &EndingConfig::default()),
            Some(SuddenReason::Rebellion)
        );
    }

    #[test]
    fn text_markers_without_log() {
        let cfg = EndingConfig::default();
        let critical = event(EventKind::Critical);
        assert_eq!(
            check_sudden(&critical, &option("叛军攻城成功", "", None), &cfg),
            Some(SuddenReason::Rebellion)
        );
        assert_eq!(
            check_sudden(&critical, &option("迎战", "皇帝中箭身亡", None), &cfg),
            Some(SuddenReason::Assassination)
        );
        assert_eq!(check_sudden(&critical, &option("迎战", "击退来敌", None), &cfg), None);
    }

    #[test]
    fn markers_ignored_outside_critical_events() {
        let opt = option("独自赴宴", "宴中有变", Some("皇帝遇刺身亡"));
        assert_eq!(
            check_sudden(&event(EventKind::FrontCourt), &opt, &EndingConfig::default()),
            None
        );
    }

    #[test]
    fn shim_can_be_disabled() {
        let cfg = EndingConfig {
            keyword_shim: false,
            ..EndingConfig::default()
        };
        let opt = option("独自赴宴", "宴中有变", Some("皇帝遇刺身亡"));
        assert_eq!(check_sudden(&event(EventKind::Critical), &opt, &cfg), None);
    }

    #[test]
    fn collapse_checked_before_sudden() {
        let mut attrs = Attributes::default();
        attrs.reputation = Decimal::ZERO;
        let opt = option("独自赴宴", "宴中有变", Some("皇帝遇刺身亡"));
        assert_eq!(
            resolve_after_choice(
                &attrs,
                &event(EventKind::Critical),
                &opt,
                &EndingConfig::default()
            ),
            Some(Ending::Collapse {
                reason: AttributeKind::Reputation
            })
        );
    }
}
