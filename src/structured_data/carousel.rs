//! schema.org ItemList / ListItem, as used for recipe carousels
//!
//! A summary page lists [`ListEntry::Url`] entries pointing at detail pages;
//! an all-in-one page embeds each [`ListEntry::Item`] directly. Positions are
//! 1-based and every entry in a list must be of the same type.

use super::error::CarouselError;
use crate::schema::Record;
use crate::structured_data::Url;
use crate::wire_enum;

wire_enum! {
    /// Ordering of an [`ItemList`]
    pub enum ItemListOrderType {
        Ascending => "https://schema.org/ItemListOrderAscending",
        Descending => "https://schema.org/ItemListOrderDescending",
        Unordered => "https://schema.org/ItemListUnordered",
    }
}

impl Default for ItemListOrderType {
    fn default() -> Self {
        ItemListOrderType::Descending
    }
}

/// What a list position refers to
#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry {
    /// Detail page of the item
    Url(Url),
    /// The item itself
    Item(Record),
}

impl ListEntry {
    /// `@type` used to check that a list is homogeneous
    pub fn type_name(&self) -> &str {
        match self {
            ListEntry::Url(_) => "URL",
            ListEntry::Item(record) => record.type_name(),
        }
    }
}

impl From<Url> for ListEntry {
    fn from(url: Url) -> Self {
        ListEntry::Url(url)
    }
}

impl From<Record> for ListEntry {
    fn from(record: Record) -> Self {
        ListEntry::Item(record)
    }
}

/// One element of an [`ItemList`]
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub position: usize,
    pub entry: ListEntry,
}

impl ListItem {
    pub fn new(position: usize, entry: impl Into<ListEntry>) -> Self {
        Self {
            position,
            entry: entry.into(),
        }
    }

    pub fn url(&self) -> Option<&Url> {
        match &self.entry {
            ListEntry::Url(url) => Some(url),
            ListEntry::Item(_) => None,
        }
    }

    pub fn item(&self) -> Option<&Record> {
        match &self.entry {
            ListEntry::Item(record) => Some(record),
            ListEntry::Url(_) => None,
        }
    }
}

/// An ordered list of same-typed entries
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemList {
    elements: Vec<ListItem>,
    order: ItemListOrderType,
    context: Option<String>,
}

impl ItemList {
    pub fn new(order: ItemListOrderType) -> Self {
        Self {
            elements: Vec::new(),
            order,
            context: None,
        }
    }

    /// Wrap each entry in a [`ListItem`] numbered from 1
    pub fn from_entries(
        entries: impl IntoIterator<Item = ListEntry>,
        order: ItemListOrderType,
    ) -> Result<Self, CarouselError> {
        let mut list = Self::new(order);
        for entry in entries {
            list.append(entry)?;
        }
        Ok(list)
    }

    /// Append an entry at the next position
    pub fn append(&mut self, entry: impl Into<ListEntry>) -> Result<(), CarouselError> {
        let position = self.number_of_items() + 1;
        self.push(ListItem::new(position, entry))
    }

    /// Append an already numbered item
    pub fn push(&mut self, item: ListItem) -> Result<(), CarouselError> {
        if let Some(first) = self.elements.first() {
            let expected = first.entry.type_name();
            let found = item.entry.type_name();
            if expected != found {
                return Err(CarouselError::MixedItemTypes {
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        }
        self.elements.push(item);
        Ok(())
    }

    /// Reorder by position according to the list's order type
    pub fn sort(&mut self) -> Result<(), CarouselError> {
        match self.order {
            ItemListOrderType::Ascending => self.elements.sort_by_key(|item| item.position),
            ItemListOrderType::Descending => self
                .elements
                .sort_by_key(|item| std::cmp::Reverse(item.position)),
            ItemListOrderType::Unordered => return Err(CarouselError::UnorderedSort),
        }
        Ok(())
    }

    pub fn has_one_type_of_item(&self) -> bool {
        match self.elements.first() {
            Some(first) => self
                .elements
                .iter()
                .all(|item| item.entry.type_name() == first.entry.type_name()),
            None => true,
        }
    }

    pub fn number_of_items(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[ListItem] {
        &self.elements
    }

    pub fn order(&self) -> ItemListOrderType {
        self.order
    }

    pub fn set_order(&mut self, order: ItemListOrderType) {
        self.order = order;
    }

    /// Attach a JSON-LD `@context`
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ConstructOptions, DataClass};
    use crate::structured_data::Person;
    use serde_json::json;

    fn url(path: &str) -> Url {
        Url::parse(&format!("https://example.com/recipes/{}", path)).unwrap()
    }

    #[test]
    fn test_positions_are_one_based() {
        let list = ItemList::from_entries(
            vec![url("pie").into(), url("cake").into()],
            ItemListOrderType::default(),
        )
        .unwrap();
        let positions: Vec<usize> = list.elements().iter().map(|item| item.position).collect();
        assert_eq!(positions, vec![1, 2]);
        assert_eq!(list.order(), ItemListOrderType::Descending);
    }

    #[test]
    fn test_mixed_types_rejected() {
        let mut list = ItemList::new(ItemListOrderType::Ascending);
        list.append(url("pie")).unwrap();
        let person = Person::construct(json!({"name": "Mary"}), &ConstructOptions::strict()).unwrap();
        let err = list.append(person.into_record()).unwrap_err();
        assert_eq!(
            err,
            CarouselError::MixedItemTypes {
                expected: "URL".to_string(),
                found: "Person".to_string()
            }
        );
        assert!(list.has_one_type_of_item());
    }

    #[test]
    fn test_sort_follows_order_type() {
        let mut list = ItemList::new(ItemListOrderType::Descending);
        list.push(ListItem::new(1, url("a"))).unwrap();
        list.push(ListItem::new(3, url("c"))).unwrap();
        list.push(ListItem::new(2, url("b"))).unwrap();
        list.sort().unwrap();
        let positions: Vec<usize> = list.elements().iter().map(|item| item.position).collect();
        assert_eq!(positions, vec![3, 2, 1]);

        list.set_order(ItemListOrderType::Ascending);
        list.sort().unwrap();
        assert_eq!(list.elements()[0].position, 1);

        list.set_order(ItemListOrderType::Unordered);
        assert_eq!(list.sort(), Err(CarouselError::UnorderedSort));
    }
}
