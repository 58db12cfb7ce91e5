//! ROOT TTree input via `oxyroot`.
//!
//! Branches are read column by column and zipped into `EventRecord`s.

use super::schema::EventRecord;
use crate::utils::config::{BRANCH_Q_DEPO_LIST, SCALAR_BRANCHES};
use crate::utils::error::ReaderError;
use log::debug;
use oxyroot::{Branch, ReaderTree, RootFile};
use std::path::Path;

/// Element type of a branch we know how to widen to `f64`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FloatKind {
    F32,
    F64,
}

/// Read every entry of `tree_name` from a ROOT file
///
/// **Public** - used by `open_event_tree`
///
/// # Errors
/// * `ReaderError::Root` - file or tree cannot be opened
/// * `ReaderError::MissingBranch` - a required branch is absent
/// * `ReaderError::UnsupportedBranchType` - branch is not float/double based
/// * `ReaderError::BranchLength` - a branch disagrees with the entry count
pub fn read_root_events(path: &Path, tree_name: &str) -> Result<Vec<EventRecord>, ReaderError> {
    let mut file = RootFile::open(path).map_err(|err| {
        map_root_error(&format!("Failed to open ROOT file '{}'", path.display()), err)
    })?;

    let tree = file
        .get_tree(tree_name)
        .map_err(|err| map_root_error(&format!("Failed to open tree '{tree_name}'"), err))?;

    let entries = usize::try_from(tree.entries()).map_err(|_| {
        ReaderError::Root(format!("Tree '{tree_name}' reports a negative entry count"))
    })?;
    debug!("Tree '{}' has {} entries", tree_name, entries);

    let mut columns = Vec::with_capacity(SCALAR_BRANCHES.len());
    for name in SCALAR_BRANCHES {
        columns.push(read_scalar_branch(&tree, name, entries)?);
    }
    let lists = read_list_branch(&tree, BRANCH_Q_DEPO_LIST, entries)?;

    let mut events = Vec::with_capacity(entries);
    for (row, q_depo_list) in lists.into_iter().enumerate() {
        events.push(EventRecord {
            e_nu: columns[0][row],
            e_avail: columns[1][row],
            e_depo_total: columns[2][row],
            q_depo_total: columns[3][row],
            q_depo_total_th_75kev: columns[4][row],
            l_depo_total: columns[5][row],
            q_depo_list,
        });
    }

    Ok(events)
}

fn lookup_branch<'a>(tree: &'a ReaderTree, name: &str) -> Result<&'a Branch, ReaderError> {
    tree.branch(name)
        .ok_or_else(|| ReaderError::MissingBranch(name.to_string()))
}

fn scalar_kind(type_name: &str) -> Option<FloatKind> {
    match type_name.to_ascii_lowercase().as_str() {
        "float" | "float_t" | "float32_t" => Some(FloatKind::F32),
        "double" | "double_t" | "double32_t" => Some(FloatKind::F64),
        _ => None,
    }
}

fn list_kind(type_name: &str) -> Option<FloatKind> {
    let lower = type_name.to_ascii_lowercase();
    if !lower.contains("vector") {
        return None;
    }
    if lower.contains("double") {
        Some(FloatKind::F64)
    } else if lower.contains("float") {
        Some(FloatKind::F32)
    } else {
        None
    }
}

fn read_scalar_branch(
    tree: &ReaderTree,
    name: &str,
    entries: usize,
) -> Result<Vec<f64>, ReaderError> {
    let branch = lookup_branch(tree, name)?;
    let type_name = branch.item_type_name();

    let values: Vec<f64> = match scalar_kind(&type_name) {
        Some(FloatKind::F64) => branch
            .as_iter::<f64>()
            .map_err(|err| map_root_error(&format!("Failed to read branch '{name}'"), err))?
            .collect(),
        Some(FloatKind::F32) => branch
            .as_iter::<f32>()
            .map_err(|err| map_root_error(&format!("Failed to read branch '{name}'"), err))?
            .map(f64::from)
            .collect(),
        None => {
            return Err(ReaderError::UnsupportedBranchType {
                name: name.to_string(),
                type_name: type_name.to_string(),
            })
        }
    };

    check_length(name, entries, values.len())?;
    Ok(values)
}

fn read_list_branch(
    tree: &ReaderTree,
    name: &str,
    entries: usize,
) -> Result<Vec<Vec<f64>>, ReaderError> {
    let branch = lookup_branch(tree, name)?;
    let type_name = branch.item_type_name();

    let values: Vec<Vec<f64>> = match list_kind(&type_name) {
        Some(FloatKind::F64) => branch
            .as_iter::<Vec<f64>>()
            .map_err(|err| map_root_error(&format!("Failed to read branch '{name}'"), err))?
            .collect(),
        Some(FloatKind::F32) => branch
            .as_iter::<Vec<f32>>()
            .map_err(|err| map_root_error(&format!("Failed to read branch '{name}'"), err))?
            .map(|list| list.into_iter().map(f64::from).collect())
            .collect(),
        None => {
            return Err(ReaderError::UnsupportedBranchType {
                name: name.to_string(),
                type_name: type_name.to_string(),
            })
        }
    };

    check_length(name, entries, values.len())?;
    Ok(values)
}

fn check_length(name: &str, expected: usize, found: usize) -> Result<(), ReaderError> {
    if expected != found {
        return Err(ReaderError::BranchLength {
            name: name.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

// oxyroot does not export its error type
fn map_root_error<E: std::fmt::Display>(context: &str, err: E) -> ReaderError {
    ReaderError::Root(format!("{context}: {err}"))
}
