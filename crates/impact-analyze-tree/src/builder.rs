//! Grouping impacted class identifiers into a repository/package tree.

use crate::model::AnalyzeTreeNode;
use crate::repository::{RepositoryCache, RepositorySnapshot};
use std::collections::HashMap;

/// Default extension of the class files searched for.
pub const DEFAULT_EXTENSION: &str = "java";

/// Default name of the bucket collecting unresolved identifiers.
pub const DEFAULT_UNKNOWN_NAME: &str = "Unknown Project";

const UNKNOWN_KEY: &str = "unknown";

/// Options for [`build_analyze_tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Extension appended to the last identifier segment, without the dot.
    pub extension: String,
    /// Display name of the bucket for identifiers no repository claims.
    pub unknown_name: String,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            unknown_name: DEFAULT_UNKNOWN_NAME.to_string(),
        }
    }
}

impl AnalyzeOptions {
    /// File name for a class segment, e.g. `Order` -> `Order.java`.
    pub fn file_name(&self, class: &str) -> String {
        let extension = self.extension.trim().trim_start_matches('.');
        let extension = if extension.is_empty() {
            DEFAULT_EXTENSION
        } else {
            extension
        };
        format!("{class}.{extension}")
    }
}

/// A parsed class identifier such as `com.acme.Order`.
struct ClassRef<'a> {
    raw: &'a str,
    /// Package folders, outermost first.
    chain: Vec<&'a str>,
    /// The class segment, when the identifier has any segment at all.
    class: Option<&'a str>,
    /// Later spellings that collapsed onto this one.
    aliases: Vec<&'a str>,
}

impl<'a> ClassRef<'a> {
    fn parse(raw: &'a str) -> Self {
        let mut chain: Vec<&str> = raw.split('.').filter(|s| !s.is_empty()).collect();
        let class = chain.pop();
        Self {
            raw,
            chain,
            class,
            aliases: Vec::new(),
        }
    }

    /// Identity used to collapse duplicates: the segment path, or the raw text.
    fn canonical(&self) -> String {
        match self.class {
            Some(class) => {
                let mut segments = self.chain.clone();
                segments.push(class);
                segments.join(".")
            }
            None => self.raw.to_string(),
        }
    }
}

/// Identifiers claimed by one repository, or by the unknown bucket.
struct Bucket<'a> {
    repository: Option<&'a RepositorySnapshot>,
    classes: Vec<ClassRef<'a>>,
}

impl Bucket<'_> {
    fn into_node(self, options: &AnalyzeOptions) -> AnalyzeTreeNode {
        let mut root = match self.repository {
            Some(repo) => AnalyzeTreeNode::folder(repo.display_name(), format!("repo-{}", repo.id)),
            None => AnalyzeTreeNode::folder(options.unknown_name.as_str(), UNKNOWN_KEY),
        };

        for class_ref in &self.classes {
            let Some(class) = class_ref.class else {
                root.push_leaf(class_ref.raw, class_ref.raw, &class_ref.aliases);
                continue;
            };

            let mut folder = &mut root;
            for segment in &class_ref.chain {
                folder = folder.folder_child(segment);
            }
            folder.push_leaf(&options.file_name(class), class_ref.raw, &class_ref.aliases);
        }

        root.sort_recursive();
        root.calculate_counts();
        root
    }
}

/// Parse identifiers in input order, folding duplicates into the first occurrence.
fn collapse_duplicates(identifiers: &[String]) -> Vec<ClassRef<'_>> {
    let mut first_by_canonical: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<ClassRef> = Vec::new();

    for identifier in identifiers {
        let class_ref = ClassRef::parse(identifier);
        match first_by_canonical.get(&class_ref.canonical()) {
            Some(&index) => {
                let first = &mut unique[index];
                if first.raw != identifier && !first.aliases.contains(&identifier.as_str()) {
                    first.aliases.push(identifier);
                }
                log::debug!("Collapsing duplicate identifier {} into {}", identifier, first.raw);
            }
            None => {
                first_by_canonical.insert(class_ref.canonical(), unique.len());
                unique.push(class_ref);
            }
        }
    }

    unique
}

/// Group class identifiers by the repository that holds their file.
///
/// Every identifier is resolved against the cache in cache order; the first
/// repository holding `<package folders>/<Class>.<extension>` claims it.
/// Unclaimed identifiers land in a trailing `unknown` bucket. Buckets appear in
/// order of first claim and only contain the folders needed to reach their
/// leaves. Duplicate identifiers are collapsed to their first occurrence; a
/// differently spelled duplicate such as `a..B` is kept as an alias of that leaf.
pub fn build_analyze_tree(
    identifiers: &[String],
    cache: &RepositoryCache,
    options: &AnalyzeOptions,
) -> Vec<AnalyzeTreeNode> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut unknown: Vec<ClassRef> = Vec::new();

    for class_ref in collapse_duplicates(identifiers) {
        let owner = class_ref
            .class
            .and_then(|class| cache.find_owner(&class_ref.chain, &options.file_name(class)));

        match owner {
            Some(repo) => match buckets
                .iter_mut()
                .find(|b| b.repository.is_some_and(|r| r.id == repo.id))
            {
                Some(bucket) => bucket.classes.push(class_ref),
                None => buckets.push(Bucket {
                    repository: Some(repo),
                    classes: vec![class_ref],
                }),
            },
            None => unknown.push(class_ref),
        }
    }

    let claimed: usize = buckets.iter().map(|b| b.classes.len()).sum();
    log::debug!(
        "Analyze tree: {} identifiers claimed by {} repositories, {} unresolved",
        claimed,
        buckets.len(),
        unknown.len()
    );

    if !unknown.is_empty() {
        buckets.push(Bucket {
            repository: None,
            classes: unknown,
        });
    }

    buckets
        .into_iter()
        .map(|bucket| bucket.into_node(options))
        .collect()
}
