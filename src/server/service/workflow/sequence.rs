//! The ordered path through the approval workflow.
//!
//! `order_number` is only an ordering key in the catalog table; in process the
//! path is an immutable [`StageSequence`] so "next stage" is a position lookup
//! rather than a next-greater-value query, and gaps in the numbering are
//! harmless.

/// Immutable, ordered view of the stage catalog for one workflow operation.
#[derive(Clone, Debug)]
pub struct StageSequence {
    stages: Vec<entity::stage::Model>,
}

impl StageSequence {
    pub fn new(mut stages: Vec<entity::stage::Model>) -> Self {
        stages.sort_by_key(|stage| stage.order_number);
        Self { stages }
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// The entry stage of the workflow
    pub fn first(&self) -> Option<&entity::stage::Model> {
        self.stages.first()
    }

    pub fn get(&self, stage_id: i32) -> Option<&entity::stage::Model> {
        self.stages.iter().find(|stage| stage.id == stage_id)
    }

    /// The immediate successor of a stage along the one legal path. `None`
    /// for the final stage or an unknown id.
    pub fn next_after(&self, stage_id: i32) -> Option<&entity::stage::Model> {
        let position = self.stages.iter().position(|stage| stage.id == stage_id)?;
        self.stages.get(position + 1)
    }

    /// Whether a stage is the final one in the workflow
    pub fn is_last(&self, stage_id: i32) -> bool {
        match self.stages.last() {
            Some(last) => last.id == stage_id,
            None => false,
        }
    }

    /// Stages ordered by `order_number`
    pub fn stages(&self) -> &[entity::stage::Model] {
        &self.stages
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::StageSequence;

    fn stage(id: i32, order_number: i32) -> entity::stage::Model {
        entity::stage::Model {
            id,
            name: format!("Stage {}", order_number),
            description: None,
            order_number,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    /// Expect ordering by order_number, not insertion order or id
    #[test]
    fn orders_by_order_number() {
        let sequence = StageSequence::new(vec![stage(7, 3), stage(2, 1), stage(5, 2)]);

        let ids: Vec<i32> = sequence.stages().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 5, 7]);
        assert_eq!(sequence.first().unwrap().id, 2);
    }

    /// Expect successor lookups to follow order_number even across gaps
    #[test]
    fn next_after_follows_gaps() {
        let sequence = StageSequence::new(vec![stage(1, 10), stage(2, 20), stage(3, 45)]);

        assert_eq!(sequence.next_after(1).unwrap().id, 2);
        assert_eq!(sequence.next_after(2).unwrap().id, 3);
        assert!(sequence.next_after(3).is_none());
    }

    /// Expect None for unknown stage ids
    #[test]
    fn next_after_unknown_stage() {
        let sequence = StageSequence::new(vec![stage(1, 1), stage(2, 2)]);

        assert!(sequence.next_after(99).is_none());
    }

    /// Expect is_last to match only the final stage
    #[test]
    fn is_last_matches_final_stage() {
        let sequence = StageSequence::new(vec![stage(1, 1), stage(2, 2)]);

        assert!(!sequence.is_last(1));
        assert!(sequence.is_last(2));
        assert!(!sequence.is_last(99));
    }

    /// Expect empty sequences to report no first or last stage
    #[test]
    fn empty_sequence() {
        let sequence = StageSequence::new(vec![]);

        assert!(sequence.is_empty());
        assert!(sequence.first().is_none());
        assert!(!sequence.is_last(1));
    }
}
