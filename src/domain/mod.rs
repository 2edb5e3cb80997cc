pub mod address;
pub mod cart;
pub mod catalog;
pub mod favorite;
pub mod merchant_order;
pub mod order;
pub mod payment;
pub mod pricing;
pub mod profile;
pub mod report;
pub mod search;

/// Entries in a collection where at most one is flagged as the default.
pub trait DefaultEntry {
    fn entry_id(&self) -> &str;
    fn is_default(&self) -> bool;
    fn set_default(&mut self, is_default: bool);
}

/// Flags `id` as the only default. Returns false (and leaves the collection
/// untouched) when `id` is unknown.
pub fn make_default<T: DefaultEntry>(entries: &mut [T], id: &str) -> bool {
    if !entries.iter().any(|entry| entry.entry_id() == id) {
        return false;
    }
    for entry in entries.iter_mut() {
        let is_target = entry.entry_id() == id;
        entry.set_default(is_target);
    }
    true
}

/// Removes `id`; if it was the default, the first remaining entry takes over.
pub fn remove_entry<T: DefaultEntry>(entries: &mut Vec<T>, id: &str) -> Option<T> {
    let index = entries.iter().position(|entry| entry.entry_id() == id)?;
    let removed = entries.remove(index);
    if removed.is_default() {
        if let Some(first) = entries.first_mut() {
            first.set_default(true);
        }
    }
    Some(removed)
}

pub fn default_entry<T: DefaultEntry>(entries: &[T]) -> Option<&T> {
    entries.iter().find(|entry| entry.is_default())
}
