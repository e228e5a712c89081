//! Building filter groups while keeping the tree as flat as possible.

use super::ast::*;

impl FilterGroup {
    pub fn new(combinator: Combinator) -> FilterGroup {
        FilterGroup {
            combinator,
            filters: vec![],
            groups: vec![],
        }
    }

    /// An empty group places no constraint on the rows.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.groups.is_empty()
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn groups(&self) -> &[FilterGroup] {
        &self.groups
    }

    /// Number of direct children, filters and groups together.
    pub fn len(&self) -> usize {
        self.filters.len() + self.groups.len()
    }

    pub fn add_filter<T: Into<Filter>>(&mut self, filter: T) {
        self.filters.push(filter.into());
    }

    /// Merge `group` into this group, compressing it where that does not change the meaning.
    pub fn add_group(&mut self, group: FilterGroup) {
        if group.is_empty() {
            return;
        }

        // same combinator: AND (a, AND (b, c)) is AND (a, b, c)
        if self.combinator == group.combinator {
            self.filters.extend(group.filters);
            for g in group.groups {
                self.add_group(g);
            }
            return;
        }

        // a group holding a single filter is that filter
        if group.groups.is_empty() && group.filters.len() == 1 {
            self.filters.extend(group.filters);
            return;
        }

        // a group holding a single group is that group
        if group.filters.is_empty() && group.groups.len() == 1 {
            for g in group.groups {
                self.add_group(g);
            }
            return;
        }

        self.groups.push(group);
    }

    /// Collect filters under `combinator` into this group.
    ///
    /// When this group already uses `combinator`, `collect` receives this group itself.
    /// Otherwise it receives a fresh group, which is merged with `add_group` afterwards.
    pub fn collect_with<F>(&mut self, combinator: Combinator, collect: F)
    where
        F: FnOnce(&mut FilterGroup),
    {
        if self.combinator == combinator {
            collect(self);
        } else {
            let mut group = FilterGroup::new(combinator);
            collect(&mut group);
            self.add_group(group);
        }
    }
}

impl From<ValueFilter> for Filter {
    fn from(value: ValueFilter) -> Self {
        Filter::Value(value)
    }
}

impl From<JoinColumnFilter> for Filter {
    fn from(value: JoinColumnFilter) -> Self {
        Filter::JoinColumn(value)
    }
}

impl From<JoinTableFilter> for Filter {
    fn from(value: JoinTableFilter) -> Self {
        Filter::JoinTable(value)
    }
}
