//! Record cache keyed by student id.
//!
//! Cloning a `StudentCache` yields another handle to the same entries, so
//! every form mount in a session sees what earlier mounts stored.

use std::sync::Arc;

use dashmap::DashMap;

use crate::types::{Student, StudentId};

#[derive(Debug, Clone, Default)]
pub struct StudentCache {
    entries: Arc<DashMap<StudentId, Student>>,
}

impl StudentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &StudentId) -> Option<Student> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, id: StudentId, student: Student) {
        self.entries.insert(id, student);
    }

    pub fn remove(&self, id: &StudentId) -> Option<Student> {
        self.entries.remove(id).map(|(_, student)| student)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewStudent;

    #[test]
    fn clones_share_entries() {
        let cache = StudentCache::new();
        let other = cache.clone();
        other.insert(StudentId::from(1), Student::from_fields(1, NewStudent::default()));
        assert_eq!(cache.get(&StudentId::from("1")).map(|s| s.id), Some(1));
        assert_eq!(cache.remove(&StudentId::from(1)).map(|s| s.id), Some(1));
        assert!(other.is_empty());
    }
}
