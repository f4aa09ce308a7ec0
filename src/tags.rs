use std::collections::HashMap;

use crate::models::TagCount;

/// Count every tag across `tag_lists` and keep the `limit` most frequent.
///
/// Tags are compared verbatim. Equal counts keep the order in which the tag
/// first appeared in the flattened sequence.
pub fn top_tags<'a, I>(tag_lists: I, limit: usize) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a [String]>,
{
    // tag -> (count, first-seen position)
    let mut bag: HashMap<&'a str, (u32, usize)> = HashMap::new();
    let mut pos = 0usize;
    for list in tag_lists {
        for tag in list {
            bag.entry(tag.as_str()).or_insert((0, pos)).0 += 1;
            pos += 1;
        }
    }

    let mut v: Vec<(&str, u32, usize)> = bag.into_iter().map(|(t, (c, first))| (t, c, first)).collect();
    v.sort_by_key(|&(_, count, first)| (std::cmp::Reverse(count), first));
    v.truncate(limit);
    v.into_iter()
        .map(|(tag, count, _)| TagCount { tag: tag.to_string(), count })
        .collect()
}
