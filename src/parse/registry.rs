use super::{node, parser};
use crate::error::DiceResult;
use crate::roll::{Chain, Pool};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

/// A function turning the text of one chain node into a pool.
///
/// Returning `None` means "not mine"; the next parser gets a try.
pub type NodeParser = dyn Fn(&str) -> Option<Pool> + Send + Sync;

/// Handle of a parser added to a [`NodeParsers`] registry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ParserId(u64);

/// An ordered list of node parsers, tried first to last.
///
/// A parser that panics counts as no match.
///
/// ```
/// use dice_chain::{parse::NodeParsers, roll::{Pool, ValueProvider, D20}};
///
/// let mut parsers = NodeParsers::new();
/// parsers.add(|text: &str| (text.trim() == "adv").then(|| Pool::new(D20)));
/// let chain = parsers.parse_chain("adv+5")?;
/// assert_eq!((chain.minimum(), chain.maximum()), (6.0, 25.0));
/// # Ok::<(), dice_chain::DiceError>(())
/// ```
#[derive(Clone)]
pub struct NodeParsers {
    parsers: Vec<(ParserId, Arc<NodeParser>)>,
    next_id: u64,
}

impl NodeParsers {
    /// Id of the built-in parser in a registry made by [`NodeParsers::new`].
    pub const BUILTIN: ParserId = ParserId(0);

    /// A registry holding only the built-in parser.
    pub fn new() -> Self {
        let mut parsers = Self::empty();
        parsers.add(node::parse_node);
        parsers
    }

    pub fn empty() -> Self {
        Self {
            parsers: vec![],
            next_id: 0,
        }
    }

    pub(crate) fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<NodeParsers> = OnceLock::new();
        BUILTIN.get_or_init(Self::new)
    }

    /// Appends `parser`, to be tried after every parser already registered.
    pub fn add<F>(&mut self, parser: F) -> ParserId
    where
        F: Fn(&str) -> Option<Pool> + Send + Sync + 'static,
    {
        let id = ParserId(self.next_id);
        let parser: Arc<NodeParser> = Arc::new(parser);
        self.next_id += 1;
        self.parsers.push((id, parser));
        id
    }

    /// Returns whether a parser with this id was registered.
    pub fn remove(&mut self, id: ParserId) -> bool {
        let len = self.parsers.len();
        self.parsers.retain(|(parser_id, _)| *parser_id != id);
        self.parsers.len() != len
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// The pool produced by the first parser matching `text`.
    pub fn parse_node(&self, text: &str) -> Option<Pool> {
        self.parsers.iter().find_map(|(id, parser)| {
            match panic::catch_unwind(AssertUnwindSafe(|| parser(text))) {
                Ok(pool) => pool,
                Err(_) => {
                    log::warn!("node parser {:?} panicked on {:?}", id, text);
                    None
                }
            }
        })
    }

    pub fn parse_chain(&self, text: &str) -> DiceResult<Chain> {
        let chain = parser::parse_chain(text, self)?;
        log::debug!("parsed {:?} as {}", text, chain);
        Ok(chain)
    }
}

impl Default for NodeParsers {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeParsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.parsers.iter().map(|(id, _)| id))
            .finish()
    }
}
