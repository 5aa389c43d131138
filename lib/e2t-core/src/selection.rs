//! Selection policy for assigning new RAN nodes to E2T instances

use e2t_api::E2TInstance;

/// Pick the least-loaded active instance.
///
/// Instances that are not active are skipped. Among the rest, the first one
/// with the smallest associated RAN list wins, so the input order decides ties.
pub fn select_least_loaded(instances: &[E2TInstance]) -> Option<&E2TInstance> {
    let mut selected: Option<&E2TInstance> = None;

    for instance in instances.iter().filter(|i| i.is_active()) {
        match selected {
            Some(current) if current.load() <= instance.load() => {}
            _ => selected = Some(instance),
        }
    }

    selected
}
