use super::repo::DeleteResult;
use std::sync::Mutex;
use tripline_domain::{Entity, ID};

/// Helpers shared by the inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    if let Some(existing) = collection.iter_mut().find(|item| item.id() == val.id()) {
        *existing = val.clone();
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == *val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection
        .iter()
        .filter(|item| compare(*item))
        .cloned()
        .collect()
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let index = collection.iter().position(|item| item.id() == *val_id)?;
    Some(collection.remove(index))
}

pub fn delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> DeleteResult {
    let mut collection = collection.lock().unwrap();
    let len_before = collection.len();
    collection.retain(|item| !compare(item));
    DeleteResult {
        deleted_count: (len_before - collection.len()) as i64,
    }
}

pub fn update_many<T: Clone, F: Fn(&T) -> bool, U: Fn(&mut T)>(
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) {
    let mut collection = collection.lock().unwrap();
    for item in collection.iter_mut() {
        if compare(item) {
            update(item);
        }
    }
}
