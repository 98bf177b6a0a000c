use std::collections::BTreeMap;

/// Id-indexed table with an auto-incrementing counter, the in-memory
/// stand-in for a database table. Ids start at 1 and are never reused;
/// iteration is id order, which is also insertion order.
#[derive(Debug)]
pub struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Allocates the next id and inserts the row `build` makes for it.
    pub fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T
    where
        T: Clone,
    {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increment() {
        let mut table: Table<(i64, &str)> = Table::new();
        let a = table.insert_with(|id| (id, "a"));
        let b = table.insert_with(|id| (id, "b"));
        assert_eq!(a.0, 1);
        assert_eq!(b.0, 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut table: Table<String> = Table::new();
        for name in ["first", "second", "third"] {
            table.insert_with(|_| name.to_string());
        }
        let names: Vec<_> = table.iter().map(String::as_str).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut table: Table<u32> = Table::new();
        table.insert_with(|_| 10);
        *table.get_mut(1).unwrap() = 7;
        assert_eq!(table.get(1), Some(&7));
        assert_eq!(table.get(99), None);
    }
}
