//! Sentence shapes for role answers. A missing or blank name renders as "not assigned yet".

fn assigned(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}

/// `"<label> is <name>."`, or `"<label> is not assigned yet."` when the name is absent/blank.
pub fn format_lead(name: Option<&str>, label: &str) -> String {
    match assigned(name) {
        Some(n) => format!("{} is {}.", label, n),
        None => format!("{} is not assigned yet.", label),
    }
}

/// `"The Co-Lead of the <wing_label> is <name|not assigned yet>."`
pub fn format_co_lead(name: Option<&str>, wing_label: &str) -> String {
    match assigned(name) {
        Some(n) => format!("The Co-Lead of the {} is {}.", wing_label, n),
        None => format!("The Co-Lead of the {} is not assigned yet.", wing_label),
    }
}
