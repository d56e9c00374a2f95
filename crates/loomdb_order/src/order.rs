//! Composable orderings over query result records.
//!
//! An [`Order`] is one of exactly three shapes:
//!
//! - [`KeyOrder`] compares two records on one field
//! - [`SetOrder`] chains orders in priority order, first non-zero wins
//! - [`CustomOrder`] applies an explicit value ranking with a key-order fallback
//!
//! Comparison never fails. Every order also renders a short description
//! via `Display` (`"name DESC, createdDate"`), used for diagnostics and
//! serialized sort descriptions.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use loomdb_value::{Record, Value};

use crate::collate::Collation;
use crate::normalize;
use crate::sorts::{EmptyPlacement, RelationFormat, SortDirection};
use crate::store::OptionStore;

/// A record comparator.
///
/// Closed over its three variants: callers construct key, set, and custom
/// orders, nothing else.
#[derive(Debug)]
pub enum Order {
    /// Single-key comparison.
    Key(KeyOrder),
    /// Priority-ordered sequence of comparisons.
    Set(SetOrder),
    /// Explicit value ranking with a fallback.
    Custom(CustomOrder),
}

impl Order {
    /// Compares two records under this order.
    #[must_use]
    pub fn cmp(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            Order::Key(order) => order.cmp(a, b),
            Order::Set(order) => order.cmp(a, b),
            Order::Custom(order) => order.cmp(a, b),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Key(order) => order.fmt(f),
            Order::Set(order) => order.fmt(f),
            Order::Custom(order) => order.fmt(f),
        }
    }
}

impl From<KeyOrder> for Order {
    fn from(order: KeyOrder) -> Self {
        Order::Key(order)
    }
}

impl From<SetOrder> for Order {
    fn from(order: SetOrder) -> Self {
        Order::Set(order)
    }
}

impl From<CustomOrder> for Order {
    fn from(order: CustomOrder) -> Self {
        Order::Custom(order)
    }
}

/// Compares two records on one field.
///
/// The comparison pipeline, in order:
///
/// 1. Normalize both values (snippet substitution, day truncation,
///    tag/status label resolution).
/// 2. With an empty placement configured, an empty value sorts after a
///    non-empty one.
/// 3. Two non-empty texts compare under the locale-aware collation.
/// 4. If either value was empty, the result flips when direction and
///    placement together route empties to the other side.
/// 5. Still equal: the generic value ordering breaks the tie.
/// 6. Null values are routed by the placement policy, with the same flip.
/// 7. A descending direction negates the result.
///
/// Labels and the collation are resolved eagerly at construction, so a
/// built instance is a pure function of its two inputs and safe to use
/// from a parallel sort.
#[derive(Debug)]
pub struct KeyOrder {
    space_id: String,
    key: String,
    direction: SortDirection,
    placement: EmptyPlacement,
    format: RelationFormat,
    include_time: bool,
    labels: HashMap<String, String>,
    collation: Collation,
}

impl KeyOrder {
    /// Creates an ascending text-format key order with no empty placement.
    #[must_use]
    pub fn new(space_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            space_id: space_id.into(),
            key: key.into(),
            direction: SortDirection::default(),
            placement: EmptyPlacement::default(),
            format: RelationFormat::default(),
            include_time: false,
            labels: HashMap::new(),
            collation: Collation::new(),
        }
    }

    /// Sets the sort direction.
    #[must_use]
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the placement of null and empty values.
    #[must_use]
    pub fn with_placement(mut self, placement: EmptyPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Sets the relation format of the field.
    #[must_use]
    pub fn with_format(mut self, format: RelationFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets whether time-of-day participates in date comparison.
    #[must_use]
    pub fn with_include_time(mut self, include_time: bool) -> Self {
        self.include_time = include_time;
        self
    }

    /// Supplies the option identifier to label mapping directly.
    ///
    /// Only tag and status formats consult it.
    #[must_use]
    pub fn with_labels(mut self, labels: HashMap<String, String>) -> Self {
        self.labels = labels;
        self
    }

    /// Resolves option labels from the store, once.
    ///
    /// Performed only for tag and status formats. A failed lookup leaves
    /// the label map empty, so every identifier resolves to empty text and
    /// sorting proceeds.
    #[must_use]
    pub fn with_options_from(mut self, store: &dyn OptionStore) -> Self {
        if matches!(self.format, RelationFormat::Tag | RelationFormat::Status) {
            self.labels = store
                .relation_options(&self.space_id, &self.key)
                .unwrap_or_default();
        }
        self
    }

    /// The space this order resolves options in.
    #[must_use]
    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    /// The record field this order compares.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The sort direction.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Compares two records on this order's field.
    #[must_use]
    pub fn cmp(&self, a: &Record, b: &Record) -> Ordering {
        let av = self.normalized(a);
        let bv = self.normalized(b);

        let mut comp = self.compare_text(&av, &bv);
        if comp == Ordering::Equal {
            comp = av.sort_cmp(&bv);
        }
        comp = self.adjust_empty_positions(&av, &bv, comp);
        if self.direction == SortDirection::Descending {
            comp = comp.reverse();
        }
        comp
    }

    fn normalized(&self, record: &Record) -> Value {
        let mut value = normalize::field_or_null(record, &self.key);
        value = normalize::substitute_snippet(record, &self.key, value);
        if self.format == RelationFormat::Date && !self.include_time {
            value = normalize::truncate_to_day(value);
        }
        if matches!(self.format, RelationFormat::Tag | RelationFormat::Status) {
            value = normalize::resolve_labels(&value, &self.labels);
        }
        value
    }

    /// Steps 2–4 of the pipeline: empty-string short-circuit, collation,
    /// and the flip routing empties to the requested side.
    fn compare_text(&self, av: &Value, bv: &Value) -> Ordering {
        let a_empty = normalize::is_empty_text(av);
        let b_empty = normalize::is_empty_text(bv);

        let mut comp = Ordering::Equal;
        if self.placement != EmptyPlacement::Unspecified
            && is_text_or_null(av)
            && is_text_or_null(bv)
        {
            comp = match (a_empty, b_empty) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                _ => Ordering::Equal,
            };
        }
        if comp == Ordering::Equal {
            if let (Value::Text(a), Value::Text(b)) = (av, bv) {
                comp = self.collation.compare(a, b);
            }
        }
        if a_empty || b_empty {
            comp = self.flip_for_placement(comp);
        }
        comp
    }

    /// Step 6: placement routing for null values. The result from earlier
    /// steps stands when neither value is null.
    fn adjust_empty_positions(&self, av: &Value, bv: &Value, comp: Ordering) -> Ordering {
        if self.placement == EmptyPlacement::Unspecified {
            return comp;
        }
        let routed = match (av.is_null(), bv.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => return comp,
        };
        self.flip_for_placement(routed)
    }

    /// Empties are flagged "sorts after" upstream; the flip routes them to
    /// the side the direction and placement combination actually asks for.
    fn flip_for_placement(&self, comp: Ordering) -> Ordering {
        let flip = matches!(
            (self.direction, self.placement),
            (SortDirection::Descending, EmptyPlacement::End)
                | (SortDirection::Ascending, EmptyPlacement::Start)
        );
        if flip {
            comp.reverse()
        } else {
            comp
        }
    }
}

impl fmt::Display for KeyOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)?;
        if self.direction == SortDirection::Descending {
            f.write_str(" DESC")?;
        }
        Ok(())
    }
}

fn is_text_or_null(value: &Value) -> bool {
    matches!(value, Value::Text(_) | Value::Null)
}

/// Priority-ordered sequence of orders.
///
/// Sub-orders are evaluated in insertion order; the first non-zero result
/// wins. Records equal under every sub-order compare equal; a stable sort
/// (or a trailing identifier key) supplies the final tiebreak.
#[derive(Debug, Default)]
pub struct SetOrder {
    orders: Vec<Order>,
}

impl SetOrder {
    /// Creates a set order from a priority-ordered list.
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Appends an order at the lowest priority.
    pub fn push(&mut self, order: impl Into<Order>) {
        self.orders.push(order.into());
    }

    /// Returns the number of sub-orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns `true` if there are no sub-orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Compares two records under the first sub-order that distinguishes
    /// them.
    #[must_use]
    pub fn cmp(&self, a: &Record, b: &Record) -> Ordering {
        for order in &self.orders {
            let comp = order.cmp(a, b);
            if comp != Ordering::Equal {
                return comp;
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for SetOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, order) in self.orders.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            order.fmt(f)?;
        }
        Ok(())
    }
}

/// Explicit value ranking for one key, with a key-order fallback.
///
/// The rank map is built once from the desired value sequence, keyed by
/// each value's token form; the first occurrence of a duplicate token
/// keeps its rank. Ranked values sort by rank ascending regardless of the
/// fallback's direction, a ranked value sorts before an unranked one
/// unconditionally, and two unranked values delegate to the fallback.
#[derive(Debug)]
pub struct CustomOrder {
    key: String,
    ranks: HashMap<String, usize>,
    fallback: KeyOrder,
}

impl CustomOrder {
    /// Creates a custom order from the desired value sequence.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        sequence: impl IntoIterator<Item = Value>,
        fallback: KeyOrder,
    ) -> Self {
        let mut ranks = HashMap::new();
        for (rank, value) in sequence.into_iter().enumerate() {
            ranks.entry(value.to_token()).or_insert(rank);
        }
        Self {
            key: key.into(),
            ranks,
            fallback,
        }
    }

    /// Compares two records, explicit ranks first.
    #[must_use]
    pub fn cmp(&self, a: &Record, b: &Record) -> Ordering {
        match (self.rank(a), self.rank(b)) {
            (Some(a_rank), Some(b_rank)) => a_rank.cmp(&b_rank),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.fallback.cmp(a, b),
        }
    }

    fn rank(&self, record: &Record) -> Option<usize> {
        let token = normalize::field_or_null(record, &self.key).to_token();
        self.ranks.get(&token).copied()
    }
}

impl fmt::Display for CustomOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<(usize, &str)> = self
            .ranks
            .iter()
            .map(|(token, rank)| (*rank, token.as_str()))
            .collect();
        entries.sort_unstable_by_key(|(rank, _)| *rank);
        for (i, (_, token)) in entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryOptions;

    fn rec(key: &str, value: impl Into<Value>) -> Record {
        Record::new().with(key, value)
    }

    fn sorted_names(order: &KeyOrder, names: &[&str]) -> Vec<String> {
        let mut records: Vec<Record> = names.iter().map(|n| rec("name", *n)).collect();
        records.sort_by(|a, b| order.cmp(a, b));
        records
            .into_iter()
            .map(|r| r.get("name").and_then(Value::as_text).unwrap().to_owned())
            .collect()
    }

    #[test]
    fn ascending_collated_text() {
        let order = KeyOrder::new("space", "name");
        assert_eq!(
            sorted_names(&order, &["banana", "Apple", "cherry"]),
            vec!["Apple", "banana", "cherry"]
        );
    }

    #[test]
    fn descending_negates() {
        let order = KeyOrder::new("space", "name").with_direction(SortDirection::Descending);
        assert_eq!(
            sorted_names(&order, &["banana", "Apple", "cherry"]),
            vec!["cherry", "banana", "Apple"]
        );
    }

    #[test]
    fn case_insensitive_ties_break_bytewise() {
        let a = rec("name", "apple");
        let b = rec("name", "Apple");
        let order = KeyOrder::new("space", "name");

        // Collation says equal; the generic value ordering breaks the tie
        assert_eq!(order.cmp(&a, &b), Ordering::Greater);
        assert_eq!(order.cmp(&b, &a), Ordering::Less);
    }

    #[test]
    fn empty_placement_end_routes_empties_last() {
        let order = KeyOrder::new("space", "name").with_placement(EmptyPlacement::End);
        assert_eq!(
            sorted_names(&order, &["", "b", "a", ""]),
            vec!["a", "b", "", ""]
        );
    }

    #[test]
    fn empty_placement_start_routes_empties_first() {
        let order = KeyOrder::new("space", "name").with_placement(EmptyPlacement::Start);
        assert_eq!(
            sorted_names(&order, &["", "b", "a", ""]),
            vec!["", "", "a", "b"]
        );
    }

    #[test]
    fn empty_placement_end_holds_under_descending() {
        let order = KeyOrder::new("space", "name")
            .with_direction(SortDirection::Descending)
            .with_placement(EmptyPlacement::End);
        assert_eq!(
            sorted_names(&order, &["", "b", "a", ""]),
            vec!["b", "a", "", ""]
        );
    }

    #[test]
    fn empties_keep_their_relative_order_under_stable_sort() {
        let order = KeyOrder::new("space", "name").with_placement(EmptyPlacement::End);
        let mut records = vec![
            rec("name", "").with("id", 1.0),
            rec("name", "b").with("id", 2.0),
            rec("name", "").with("id", 3.0),
        ];
        records.sort_by(|a, b| order.cmp(a, b));

        let ids: Vec<f64> = records
            .iter()
            .map(|r| r.get("id").and_then(Value::as_number).unwrap())
            .collect();
        assert_eq!(ids, vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn missing_field_counts_as_null() {
        let absent = Record::new().with("id", 1.0);
        let present = rec("name", "a");

        let order = KeyOrder::new("space", "name").with_placement(EmptyPlacement::End);
        assert_eq!(order.cmp(&absent, &present), Ordering::Greater);

        let order = KeyOrder::new("space", "name").with_placement(EmptyPlacement::Start);
        assert_eq!(order.cmp(&absent, &present), Ordering::Less);
    }

    #[test]
    fn unspecified_placement_orders_null_before_text() {
        // Without a placement policy, nulls fall through to the generic
        // kind ordering, which puts null first.
        let absent = Record::new();
        let present = rec("name", "a");

        let order = KeyOrder::new("space", "name");
        assert_eq!(order.cmp(&absent, &present), Ordering::Less);
    }

    #[test]
    fn date_truncation_equates_same_day() {
        // 2024-03-05, morning and night
        let morning = rec("createdDate", 1_709_633_700.0);
        let night = rec("createdDate", 1_709_683_199.0);

        let by_day = KeyOrder::new("space", "createdDate").with_format(RelationFormat::Date);
        assert_eq!(by_day.cmp(&morning, &night), Ordering::Equal);

        let by_instant = KeyOrder::new("space", "createdDate")
            .with_format(RelationFormat::Date)
            .with_include_time(true);
        assert_eq!(by_instant.cmp(&morning, &night), Ordering::Less);
    }

    #[test]
    fn tags_compare_by_resolved_labels() {
        let mut store = InMemoryOptions::new();
        store.insert("space", "tags", [("o1", "Alpha"), ("o2", "Beta")]);

        let order = KeyOrder::new("space", "tags")
            .with_format(RelationFormat::Tag)
            .with_options_from(&store);

        let a = rec("tags", Value::text_list(["o1"]));
        let b = rec("tags", Value::text_list(["o2"]));
        assert_eq!(order.cmp(&a, &b), Ordering::Less);
    }

    #[test]
    fn tag_labels_concatenate_in_list_order() {
        let mut store = InMemoryOptions::new();
        store.insert("space", "tags", [("o1", "Alpha"), ("o2", "Beta")]);

        let order = KeyOrder::new("space", "tags")
            .with_format(RelationFormat::Tag)
            .with_options_from(&store);

        // "BetaAlpha" vs "AlphaBeta": list order matters, no re-sorting
        let a = rec("tags", Value::text_list(["o2", "o1"]));
        let b = rec("tags", Value::text_list(["o1", "o2"]));
        assert_eq!(order.cmp(&a, &b), Ordering::Greater);
    }

    #[test]
    fn unresolved_tags_compare_as_empty() {
        // No labels registered: all tag values degrade to empty text
        let order = KeyOrder::new("space", "tags")
            .with_format(RelationFormat::Tag)
            .with_options_from(&InMemoryOptions::new());

        let a = rec("tags", Value::text_list(["o1"]));
        let b = rec("tags", Value::text_list(["o2"]));
        assert_eq!(order.cmp(&a, &b), Ordering::Equal);
    }

    #[test]
    fn note_sorts_by_snippet_when_name_is_empty() {
        let note = Record::new()
            .with(crate::keys::LAYOUT, crate::keys::LAYOUT_NOTE as f64)
            .with(crate::keys::NAME, "")
            .with(crate::keys::SNIPPET, "aardvark notes");
        let page = rec("name", "Beta page");

        let order = KeyOrder::new("space", "name");
        assert_eq!(order.cmp(&note, &page), Ordering::Less);
    }

    #[test]
    fn set_order_stops_at_first_nonzero() {
        let set = SetOrder::new(vec![
            KeyOrder::new("space", "status").into(),
            KeyOrder::new("space", "name").into(),
        ]);

        let a = Record::new().with("status", "open").with("name", "z");
        let b = Record::new().with("status", "open").with("name", "a");
        let c = Record::new().with("status", "done").with("name", "z");

        // Equal on the first key: the second key decides
        assert_eq!(set.cmp(&a, &b), Ordering::Greater);
        // Different on the first key: the second key is ignored
        assert_eq!(set.cmp(&c, &a), Ordering::Less);
    }

    #[test]
    fn empty_set_order_compares_equal() {
        let set = SetOrder::default();
        assert_eq!(set.cmp(&rec("a", 1.0), &rec("a", 2.0)), Ordering::Equal);
    }

    #[test]
    fn custom_order_overrides_fallback_direction() {
        let fallback =
            KeyOrder::new("space", "status").with_direction(SortDirection::Descending);
        let custom = CustomOrder::new(
            "status",
            vec![Value::text("v2"), Value::text("v1")],
            fallback,
        );

        let v1 = rec("status", "v1");
        let v2 = rec("status", "v2");
        let unlisted = rec("status", "v9");

        // Explicit placement wins over the descending fallback
        assert_eq!(custom.cmp(&v2, &v1), Ordering::Less);
        assert_eq!(custom.cmp(&v1, &v2), Ordering::Greater);
        // Unlisted values sort after every listed one
        assert_eq!(custom.cmp(&unlisted, &v1), Ordering::Greater);
        assert_eq!(custom.cmp(&unlisted, &v2), Ordering::Greater);
    }

    #[test]
    fn custom_order_delegates_unranked_pairs() {
        let custom = CustomOrder::new(
            "status",
            vec![Value::text("pinned")],
            KeyOrder::new("space", "status"),
        );

        let a = rec("status", "alpha");
        let b = rec("status", "beta");
        assert_eq!(custom.cmp(&a, &b), Ordering::Less);
    }

    #[test]
    fn duplicate_custom_tokens_keep_the_first_rank() {
        let custom = CustomOrder::new(
            "status",
            vec![Value::text("a"), Value::text("b"), Value::text("a")],
            KeyOrder::new("space", "status"),
        );

        assert_eq!(
            custom.cmp(&rec("status", "a"), &rec("status", "b")),
            Ordering::Less
        );
        assert_eq!(custom.to_string(), "\"a\", \"b\"");
    }

    #[test]
    fn display_renders_sort_descriptions() {
        let set = SetOrder::new(vec![
            KeyOrder::new("space", "name")
                .with_direction(SortDirection::Descending)
                .into(),
            KeyOrder::new("space", "createdDate").into(),
        ]);
        assert_eq!(set.to_string(), "name DESC, createdDate");

        let custom = CustomOrder::new(
            "status",
            vec![Value::text("v2"), Value::text("v1")],
            KeyOrder::new("space", "status"),
        );
        assert_eq!(custom.to_string(), "\"v2\", \"v1\"");
    }
}
