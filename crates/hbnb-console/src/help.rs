//! Help text keyed by command verb.

/// `(verb, description, usage)` for every documented command.
const TOPICS: &[(&str, &str, &str)] = &[
    ("EOF", "Exits the console at end of input", "Usage: EOF (or Ctrl-D)"),
    ("all", "Prints the string representations of all instances", "Usage: all [<class_name>]"),
    ("count", "Counts the number of instances of a class", "Usage: count <class_name>"),
    ("create", "Creates a new instance of a specified class", "Usage: create <class_name>"),
    ("destroy", "Deletes an instance", "Usage: destroy <class_name> <id>"),
    (
        "help",
        "Lists available commands or shows help for one command",
        "Usage: help [<command>]",
    ),
    ("quit", "Exits the console", "Usage: quit"),
    ("show", "Prints the string representation of an instance", "Usage: show <class_name> <id>"),
    (
        "update",
        "Updates an instance based on the class name and id",
        "Usage: update <class_name> <id> <attribute_name> \"<attribute_value>\"",
    ),
];

/// Help for a single verb, or `None` if the verb is undocumented.
pub fn topic(verb: &str) -> Option<String> {
    TOPICS
        .iter()
        .find(|(name, _, _)| *name == verb)
        .map(|(_, description, usage)| format!("{description}\n{usage}"))
}

/// Listing of every documented verb.
pub fn overview() -> String {
    let header = "Documented commands (type help <topic>):";
    let names: Vec<&str> = TOPICS.iter().map(|(name, _, _)| *name).collect();
    format!("\n{header}\n{}\n{}\n", "=".repeat(header.len()), names.join("  "))
}

/// Render `help [<topic>]`.
pub fn render(topic_name: Option<&str>) -> String {
    match topic_name {
        None => overview(),
        Some(name) => topic(name).unwrap_or_else(|| format!("*** No help on {name}")),
    }
}
