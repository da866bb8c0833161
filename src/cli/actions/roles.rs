use crate::role::Role;

/// Print every role with its dashboard and headline.
pub fn execute() {
    for role in Role::ALL {
        let content = role.content();
        println!(
            "{:<9} {:<9} {:<20} {}",
            role.as_str(),
            role.label(),
            role.dashboard_path(),
            content.title
        );
    }
}
