//! Module dependency ordering

use super::{LifecycleError, Result};
use crate::module::ModuleMetadata;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Order modules so every module comes after the modules it depends on.
///
/// Returns indices into `modules`. Independent modules keep their registration
/// order. Duplicate names, unknown dependencies and cycles are rejected.
pub fn resolve_order(modules: &[ModuleMetadata]) -> Result<Vec<usize>> {
    let mut index = HashMap::with_capacity(modules.len());
    for (i, module) in modules.iter().enumerate() {
        if index.insert(module.name.as_str(), i).is_some() {
            return Err(LifecycleError::DuplicateModule(module.name.clone()));
        }
    }

    for module in modules {
        if let Some(missing) = module
            .dependencies
            .iter()
            .find(|dep| !index.contains_key(dep.as_str()))
        {
            return Err(LifecycleError::MissingDependency {
                module: module.name.clone(),
                dependency: missing.clone(),
            });
        }
    }

    let mut marks = vec![Mark::Unvisited; modules.len()];
    let mut stack = Vec::new();
    let mut order = Vec::with_capacity(modules.len());

    for i in 0..modules.len() {
        visit(i, modules, &index, &mut marks, &mut stack, &mut order)?;
    }

    Ok(order)
}

fn visit(
    i: usize,
    modules: &[ModuleMetadata],
    index: &HashMap<&str, usize>,
    marks: &mut [Mark],
    stack: &mut Vec<usize>,
    order: &mut Vec<usize>,
) -> Result<()> {
    match marks[i] {
        Mark::Done => return Ok(()),
        Mark::Visiting => {
            let start = stack.iter().position(|&j| j == i).unwrap_or(0);
            let mut cycle: Vec<&str> = stack[start..]
                .iter()
                .map(|&j| modules[j].name.as_str())
                .collect();
            cycle.push(modules[i].name.as_str());
            return Err(LifecycleError::CircularDependency {
                cycle: cycle.join(" -> "),
            });
        }
        Mark::Unvisited => {}
    }

    marks[i] = Mark::Visiting;
    stack.push(i);

    for dep in &modules[i].dependencies {
        if let Some(&j) = index.get(dep.as_str()) {
            visit(j, modules, index, marks, stack, order)?;
        }
    }

    stack.pop();
    marks[i] = Mark::Done;
    order.push(i);
    Ok(())
}
