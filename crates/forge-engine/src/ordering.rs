//! Member collection, ignore filtering, replacement, and final ordering.
//!
//! The raw member list is collected by walking the class hierarchy most
//! general ancestor first; same-named re-declarations merge into inheritance
//! layers at the position of the first declaration. Three passes then run in
//! fixed order: ignore filtering, replacement, rank/placement sorting.
//! Unresolved ignore and replace references are silent no-ops by design:
//! best-effort authoring ergonomics, not errors.

use crate::source::Source;
use forge_model::component::{ComponentRegistry, MemberRef};

/// Collect the members of `class_name` and all ancestors as merged Sources,
/// most general declarations first, in declaration order per class.
pub fn collect_sources(registry: &ComponentRegistry, class_name: &str) -> Vec<Source> {
    let mut sources: Vec<Source> = Vec::new();
    for class in registry.hierarchy(class_name) {
        for field in &class.fields {
            if let Some(existing) = sources.iter_mut().find(|s| s.field.name == field.name) {
                existing.add_layer(&class.name, field);
            } else {
                sources.push(Source::new(&class.name, field.clone()));
            }
        }
    }
    sources
}

/// Drop Sources matched by an ignore directive. A directive with an explicit
/// class only applies when that class belongs to the context hierarchy, so a
/// rule can never remove an unrelated same-named member.
pub fn filter_ignored(
    sources: Vec<Source>,
    ignores: &[MemberRef],
    registry: &ComponentRegistry,
    context_class: &str,
) -> Vec<Source> {
    sources
        .into_iter()
        .filter(|source| {
            !ignores.iter().any(|reference| {
                let in_scope = reference
                    .class
                    .as_deref()
                    .is_none_or(|class| registry.in_hierarchy(context_class, class));
                in_scope && source.matches(reference)
            })
        })
        .collect()
}

/// Apply replace directives.
///
/// For each Source carrying a directive, the first distinct match elsewhere
/// in the collection is superseded: the replacer takes over its list
/// position, inherits its rank when it declared none of its own, and the
/// replaced Source is removed. A removed Source's own pending directive is
/// cancelled, so replacement chains never cascade. Processing follows the
/// stable collection order, making chained declarations deterministic.
pub fn apply_replacements(sources: Vec<Source>) -> Vec<Source> {
    let len = sources.len();
    // Slot layout: each entry starts in its own slot; a replacement moves the
    // replacer into the victim's slot and empties both originals.
    let mut slots: Vec<Option<Source>> = sources.into_iter().map(Some).collect();
    let mut cancelled = vec![false; len];

    for index in 0..len {
        if cancelled[index] {
            continue;
        }
        let Some(reference) = slots[index]
            .as_ref()
            .and_then(|s| s.field.replace.clone())
        else {
            continue;
        };
        let victim = (0..len).find(|&j| {
            j != index
                && slots[j]
                    .as_ref()
                    .is_some_and(|candidate| candidate.matches(&reference))
        });
        let Some(victim) = victim else {
            // Nothing matched: a best-effort no-op, not an error.
            continue;
        };

        let removed = slots[victim].take().expect("victim slot checked above");
        let mut replacer = slots[index].take().expect("replacer slot is occupied");
        if replacer.field.rank.is_none() && replacer.rank_override.is_none() {
            replacer.rank_override = Some(removed.effective_rank());
        }
        slots[victim] = Some(replacer);
        if removed.field.replace.is_some() {
            cancelled[victim] = true;
        }
    }

    slots.into_iter().flatten().collect()
}

/// Final ordering: stable sort by effective rank, then re-splice members
/// carrying explicit before/after placement next to their anchors.
pub fn sort_sources(sources: &mut Vec<Source>) {
    sources.sort_by_key(Source::effective_rank);

    let placed: Vec<String> = sources
        .iter()
        .filter(|s| {
            s.field
                .place
                .as_ref()
                .is_some_and(|p| p.before.is_some() || p.after.is_some())
        })
        .map(|s| s.field.name.clone())
        .collect();

    for name in placed {
        let Some(from) = sources.iter().position(|s| s.field.name == name) else {
            continue;
        };
        let place = sources[from].field.place.clone().unwrap_or_default();
        let (anchor_ref, after) = match (&place.before, &place.after) {
            (Some(reference), _) => (reference.clone(), false),
            (None, Some(reference)) => (reference.clone(), true),
            (None, None) => continue,
        };
        let moved = sources.remove(from);
        let anchor = sources.iter().position(|s| s.matches(&anchor_ref));
        match anchor {
            Some(at) => {
                let insert_at = if after { at + 1 } else { at };
                sources.insert(insert_at, moved);
            }
            None => {
                // Unresolved anchor: restore the original position.
                sources.insert(from, moved);
            }
        }
    }
}

/// The full pass: collect, filter, replace, sort. `extra_ignores` carries
/// field-level ignores contributed by a recursing container.
pub fn ordered_sources(
    registry: &ComponentRegistry,
    class_name: &str,
    extra_ignores: &[MemberRef],
) -> Vec<Source> {
    let sources = collect_sources(registry, class_name);

    let mut ignores: Vec<MemberRef> = Vec::new();
    for class in registry.hierarchy(class_name) {
        ignores.extend(class.ignore.iter().cloned());
    }
    ignores.extend(extra_ignores.iter().cloned());

    let sources = filter_ignored(sources, &ignores, registry, class_name);
    let mut sources = apply_replacements(sources);
    sort_sources(&mut sources);
    sources
}
