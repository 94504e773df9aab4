//! Common types

use uuid::Uuid;

pub type EntityId = Uuid;

pub fn new_id() -> EntityId {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_unique() {
        assert_ne!(new_id(), new_id());
    }
}
