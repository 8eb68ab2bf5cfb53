use std::collections::HashMap;
use std::hash::Hash;

/// Group `items` by key and fold each item into its group's accumulator,
/// in a single pass.
///
/// Groups are returned in the order their key was first seen. Either closure
/// may fail, which aborts the whole grouping.
pub fn group_fold<T, K, A, E>(
    items: impl IntoIterator<Item = T>,
    mut key_of: impl FnMut(&T) -> Result<K, E>,
    mut fold: impl FnMut(&mut A, T) -> Result<(), E>,
) -> Result<Vec<(K, A)>, E>
where
    K: Eq + Hash + Clone,
    A: Default,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, A)> = Vec::new();

    for item in items {
        let key = key_of(&item)?;
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, A::default()));
            groups.len() - 1
        });
        fold(&mut groups[slot].1, item)?;
    }

    Ok(groups)
}
