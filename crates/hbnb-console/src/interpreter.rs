//! Command dispatch and handlers.
//!
//! Each line goes through normalize → tokenize → dispatch → report. Handlers
//! check their arguments in a fixed order and either apply the whole command
//! (including persistence) or leave the store exactly as it was.

use hbnb_schema::SchemaRegistry;
use hbnb_store::RecordStore;
use hbnb_types::{composite_key, ClassName, Record, Value};
use tracing::{debug, warn};

use crate::error::{CommandError, CommandResult};
use crate::help;
use crate::mapping::parse_mapping;
use crate::normalize::normalize;
use crate::tokenize::{split_args, split_verb};

/// What the session should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep reading.
    Output(String),
    /// Nothing to print; keep reading.
    Silent,
    /// End the session.
    Quit,
}

/// Line-oriented command interpreter over a record store.
pub struct Interpreter<S: RecordStore> {
    store: S,
    registry: SchemaRegistry,
}

impl<S: RecordStore> Interpreter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            registry: SchemaRegistry::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Run one input line.
    pub fn execute(&mut self, line: &str) -> Reply {
        let line = normalize(line);
        let (verb, rest) = split_verb(&line);
        if verb.is_empty() {
            return Reply::Silent;
        }
        let args = split_args(rest);
        debug!(verb, ?args, "dispatching command");

        let result = match verb {
            "quit" | "EOF" => return Reply::Quit,
            "help" | "?" => return Reply::Output(help::render(args.first().map(String::as_str))),
            "create" => self.do_create(&args),
            "show" => self.do_show(&args),
            "destroy" => self.do_destroy(&args),
            "all" => self.do_all(&args),
            "update" => self.do_update(&args),
            "count" => self.do_count(&args),
            _ => return Reply::Output(format!("*** Unknown syntax: {}", line.trim())),
        };

        match result {
            Ok(Some(text)) => Reply::Output(text),
            Ok(None) => Reply::Silent,
            Err(err) => {
                debug!(verb, error = ?err, "command rejected");
                Reply::Output(err.to_string())
            }
        }
    }

    // -------------------------------------------------------------------
    // Handlers
    // -------------------------------------------------------------------

    fn do_create(&mut self, args: &[String]) -> CommandResult<Option<String>> {
        let class = self.require_class(args)?;
        let record = Record::new(class);
        let id = record.id().to_string();
        let key = record.key();
        self.store.insert(record);
        self.persist(|store| {
            store.remove(&key);
        })?;
        Ok(Some(id))
    }

    fn do_show(&mut self, args: &[String]) -> CommandResult<Option<String>> {
        let key = self.require_instance(args)?;
        let record = self.store.get(&key).ok_or(CommandError::UnknownInstance)?;
        Ok(Some(record.to_string()))
    }

    fn do_destroy(&mut self, args: &[String]) -> CommandResult<Option<String>> {
        let key = self.require_instance(args)?;
        let removed = self.store.remove(&key).ok_or(CommandError::UnknownInstance)?;
        self.persist(move |store| {
            store.insert(removed);
        })?;
        Ok(None)
    }

    fn do_all(&mut self, args: &[String]) -> CommandResult<Option<String>> {
        let filter = match args.first() {
            None => None,
            Some(name) => Some(self.registry.resolve(name).ok_or(CommandError::UnknownClass)?),
        };
        let items: Vec<String> = self
            .store
            .records_of(filter)
            .into_iter()
            .map(Record::to_string)
            .collect();
        Ok(Some(format!("[{}]", items.join(", "))))
    }

    fn do_count(&mut self, args: &[String]) -> CommandResult<Option<String>> {
        let class = args
            .first()
            .and_then(|name| self.registry.resolve(name))
            .ok_or(CommandError::UnknownClass)?;
        Ok(Some(self.store.count_class(class).to_string()))
    }

    fn do_update(&mut self, args: &[String]) -> CommandResult<Option<String>> {
        let key = self.require_instance(args)?;
        if !self.store.all().contains_key(&key) {
            return Err(CommandError::UnknownInstance);
        }
        let attribute = args.get(2).ok_or(CommandError::MissingAttributeName)?;

        let raw_pairs = if attribute.starts_with('{') {
            let pairs = parse_mapping(attribute)?;
            if pairs.is_empty() {
                return Err(CommandError::MissingAttributeName);
            }
            pairs
        } else {
            let value = args.get(3).ok_or(CommandError::MissingValue)?;
            vec![(attribute.clone(), value.clone())]
        };

        // Validate and coerce everything before touching the record.
        let mut updates: Vec<(String, Value)> = Vec::with_capacity(raw_pairs.len());
        for (name, raw) in raw_pairs {
            if Record::is_reserved(&name) {
                return Err(CommandError::ReadOnlyAttribute(name));
            }
            let value = self.registry.coerce(&name, &raw)?;
            updates.push((name, value));
        }

        let record = self.store.get_mut(&key).ok_or(CommandError::UnknownInstance)?;
        let before = record.clone();
        for (name, value) in updates {
            record.set(name, value);
        }
        record.touch();

        self.persist(move |store| {
            store.insert(before);
        })?;
        Ok(None)
    }

    // -------------------------------------------------------------------
    // Argument checks
    // -------------------------------------------------------------------

    /// First argument as a known class.
    fn require_class(&self, args: &[String]) -> CommandResult<ClassName> {
        let name = args.first().ok_or(CommandError::MissingClassName)?;
        self.registry.resolve(name).ok_or(CommandError::UnknownClass)
    }

    /// First two arguments as the composite key of a (possibly absent) record.
    fn require_instance(&self, args: &[String]) -> CommandResult<String> {
        let class = self.require_class(args)?;
        let id = args.get(1).ok_or(CommandError::MissingId)?;
        Ok(composite_key(class, id))
    }

    /// Save the store, undoing the in-memory change if the save fails.
    fn persist(&mut self, undo: impl FnOnce(&mut S)) -> CommandResult<()> {
        if let Err(err) = self.store.save() {
            warn!(error = %err, "save failed, reverting command");
            undo(&mut self.store);
            return Err(err.into());
        }
        Ok(())
    }
}
