//! Per-category event pools for the current cycle.
//!
//! Each category holds a FIFO queue of [`EventInstance`]s. Showing an event
//! does not consume it; only [`EventPool::resolve`] removes it from its
//! queue. Critical and system events never enter a pool.

use std::collections::{BTreeMap, VecDeque};

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use reign_court::dice::draw_id;
use reign_types::{
    CategoryCount, CycleMode, EventCategory, EventId, EventInstance, EventKind, EventOption,
    EventTemplate, ReignStage,
};

use crate::catalog::{ContentCatalog, pick_template};
use crate::config::PoolConfig;

/// Bind a template to fresh identities.
pub fn instantiate(
    template: &EventTemplate,
    kind: EventKind,
    category: Option<EventCategory>,
    stage: ReignStage,
    rng: &mut impl Rng,
) -> EventInstance {
    let options = template
        .options
        .iter()
        .map(|o| EventOption {
            id: draw_id(rng),
            text: o.text.clone(),
            feedback: o.feedback.clone(),
            log_text: o.log_text.clone(),
            attitude: o.attitude,
            delta: o.delta.clone(),
            outcome: o.outcome,
            effect: None,
        })
        .collect();
    EventInstance {
        id: draw_id(rng),
        title: template.title.clone(),
        kind,
        category,
        description: template.description.clone(),
        options,
        is_processed: false,
        chosen_feedback: None,
        stage,
    }
}

/// Event queues for one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPool {
    /// Unresolved events per category, oldest first.
    queues: BTreeMap<EventCategory, VecDeque<EventInstance>>,

    /// Events resolved this cycle, in resolution order.
    resolved: Vec<EventInstance>,
}

impl EventPool {
    /// An empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pool's contents with a fresh draw for a new cycle.
    ///
    /// Seasonal cycles draw `seasonal_min..=seasonal_max` events per
    /// category. Monthly cycles make one draw of
    /// `monthly_min..=monthly_max` events spread over random categories.
    pub fn refill_for_cycle(
        &mut self,
        catalog: &dyn ContentCatalog,
        mode: CycleMode,
        stage: ReignStage,
        config: &PoolConfig,
        rng: &mut impl Rng,
    ) {
        self.queues.clear();
        self.resolved.clear();

        let draws: Vec<EventCategory> = match mode {
            CycleMode::Seasonal => {
                let low = config.seasonal_min_per_category;
                let high = config.seasonal_max_per_category.max(low);
                let mut draws = Vec::new();
                for category in EventCategory::ALL {
                    let count = rng.random_range(low..=high);
                    for _ in 0..count {
                        draws.push(category);
                    }
                }
                draws
            }
            CycleMode::Monthly => {
                let low = config.monthly_min_total;
                let high = config.monthly_max_total.max(low);
                let count = rng.random_range(low..=high);
                (0..count)
                    .filter_map(|_| EventCategory::ALL.choose(rng).copied())
                    .collect()
            }
        };

        for category in draws {
            let template = pick_template(catalog, category, stage, rng);
            let instance = instantiate(&template, category.kind(), Some(category), stage, rng);
            self.queues.entry(category).or_default().push_back(instance);
        }
        debug!(pending = self.total_pending(), ?mode, ?stage, "pool refilled");
    }

    /// Head of a category queue, without removing it.
    pub fn peek(&self, category: EventCategory) -> Option<&EventInstance> {
        self.queues.get(&category).and_then(VecDeque::front)
    }

    /// Whether `event_id` is at the head of its category queue.
    pub fn is_head(&self, event_id: EventId) -> bool {
        self.queues
            .values()
            .any(|q| q.front().is_some_and(|e| e.id == event_id))
    }

    /// Find an unresolved event anywhere in the pool.
    pub fn find(&self, event_id: EventId) -> Option<&EventInstance> {
        self.queues
            .values()
            .flat_map(VecDeque::iter)
            .find(|e| e.id == event_id)
    }

    /// Remove an event from its queue and mark it processed with the chosen
    /// feedback. Returns `None` if the event is not pending.
    pub fn resolve(&mut self, event_id: EventId, feedback: &str) -> Option<EventInstance> {
        for queue in self.queues.values_mut() {
            if let Some(pos) = queue.iter().position(|e| e.id == event_id) {
                let mut event = queue.remove(pos)?;
                event.is_processed = true;
                event.chosen_feedback = Some(feedback.to_owned());
                self.resolved.push(event.clone());
                return Some(event);
            }
        }
        None
    }

    /// True iff every category queue is empty.
    pub fn is_exhausted(&self) -> bool {
        self.queues.values().all(VecDeque::is_empty)
    }

    /// Unresolved events in one category.
    pub fn pending(&self, category: EventCategory) -> u32 {
        self.queues
            .get(&category)
            .map_or(0, |q| u32::try_from(q.len()).unwrap_or(u32::MAX))
    }

    /// Unresolved events in all categories.
    pub fn total_pending(&self) -> u32 {
        EventCategory::ALL
            .iter()
            .fold(0_u32, |acc, c| acc.saturating_add(self.pending(*c)))
    }

    /// Events resolved this cycle.
    pub fn processed_count(&self) -> u32 {
        u32::try_from(self.resolved.len()).unwrap_or(u32::MAX)
    }

    /// Pending counts for every category, in pool order.
    pub fn counts(&self) -> Vec<CategoryCount> {
        EventCategory::ALL
            .iter()
            .map(|c| CategoryCount {
                category: *c,
                pending: self.pending(*c),
            })
            .collect()
    }

    /// Every event drawn this cycle: resolved ones first, then pending ones
    /// in category order.
    pub fn cycle_events(&self) -> Vec<EventInstance> {
        self.resolved
            .iter()
            .chain(self.queues.values().flat_map(VecDeque::iter))
            .cloned()
            .collect()
    }

    /// Remove and return every unresolved event.
    pub fn drain_unprocessed(&mut self) -> Vec<EventInstance> {
        let mut drained = Vec::new();
        for queue in self.queues.values_mut() {
            drained.extend(queue.drain(..));
        }
        drained
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog::TableCatalog;

    fn seasonal_pool(rng: &mut StdRng) -> EventPool {
        let catalog = TableCatalog::builtin().unwrap();
        let mut pool = EventPool::new();
        pool.refill_for_cycle(
            &catalog,
            CycleMode::Seasonal,
            ReignStage::EarlyReign,
            &PoolConfig::default(),
            rng,
        );
        pool
    }

    #[test]
    fn seasonal_refill_fills_every_category() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = seasonal_pool(&mut rng);
        for category in EventCategory::ALL {
            assert!((3..=5).contains(&pool.pending(category)));
            let head = pool.peek(category).unwrap();
            assert_eq!(head.category, Some(category));
            assert_eq!(head.kind, category.kind());
            assert!(!head.is_processed);
        }
        assert!(!pool.is_exhausted());
    }

    #[test]
    fn monthly_refill_is_one_shared_draw() {
        let mut rng = StdRng::seed_from_u64(2);
        let catalog = TableCatalog::builtin().unwrap();
        let mut pool = EventPool::new();
        pool.refill_for_cycle(
            &catalog,
            CycleMode::Monthly,
            ReignStage::Stable,
            &PoolConfig::default(),
            &mut rng,
        );
        assert!((4..=6).contains(&pool.total_pending()));
    }

    #[test]
    fn peek_does_not_consume() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = seasonal_pool(&mut rng);
        let first = pool.peek(EventCategory::Harem).unwrap().id;
        assert_eq!(pool.peek(EventCategory::Harem).unwrap().id, first);
    }

    #[test]
    fn resolve_removes_exactly_once() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut pool = seasonal_pool(&mut rng);
        let before = pool.pending(EventCategory::FrontCourt);
        let id = pool.peek(EventCategory::FrontCourt).unwrap().id;

        let resolved = pool.resolve(id, "好").unwrap();
        assert!(resolved.is_processed);
        assert_eq!(resolved.chosen_feedback.as_deref(), Some("好"));
        assert_eq!(pool.pending(EventCategory::FrontCourt), before - 1);
        assert!(pool.resolve(id, "好").is_none());
        assert_eq!(pool.pending(EventCategory::FrontCourt), before - 1);
        assert_eq!(pool.processed_count(), 1);
    }

    #[test]
    fn exhausted_iff_all_queues_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pool = seasonal_pool(&mut rng);
        for category in EventCategory::ALL {
            while let Some(id) = pool.peek(category).map(|e| e.id) {
                assert!(!pool.is_exhausted());
                pool.resolve(id, "");
            }
        }
        assert!(pool.is_exhausted());
        assert_eq!(pool.total_pending(), 0);
    }

    #[test]
    fn only_queue_fronts_are_heads() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = seasonal_pool(&mut rng);
        let queued: Vec<_> = pool
            .cycle_events()
            .into_iter()
            .filter(|e| e.category == Some(EventCategory::FrontCourt))
            .collect();
        let head = queued.first().unwrap().id;
        let tail = queued.last().unwrap().id;
        assert_eq!(pool.peek(EventCategory::FrontCourt).unwrap().id, head);
        assert!(pool.is_head(head));
        assert!(!pool.is_head(tail));
    }

    #[test]
    fn drain_returns_leftovers() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut pool = seasonal_pool(&mut rng);
        let total = pool.total_pending();
        let id = pool.peek(EventCategory::Harem).unwrap().id;
        pool.resolve(id, "");
        assert_eq!(pool.cycle_events().len(), usize::try_from(total).unwrap());
        let drained = pool.drain_unprocessed();
        assert_eq!(drained.len(), usize::try_from(total - 1).unwrap());
        assert!(pool.is_exhausted());
    }
}
