//! The interactive pass: one question per difference, building an [`ActionPlan`].

use crate::diff::{Annotation, Diff, inclusive_brews};
use crate::error::Result;
use crate::graph::DependencyGraph;
use crate::plan::ActionPlan;
use crate::probe::LiveState;
use crate::prompt::{DefaultAnswer, Prompter};
use crate::statefile::DesiredState;
use crate::style;
use std::collections::HashSet;
use std::io::{BufRead, Write};
use tracing::debug;

/// The four kinds of per-item question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Tap,
    Untap,
    Install,
    Remove,
}

impl Category {
    fn title(self) -> &'static str {
        match self {
            Category::Tap => "Possibly new taps",
            Category::Untap => "Possibly removed taps",
            Category::Install => "Possibly new brews",
            Category::Remove => "Possibly removed brews",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Category::Tap => "Tap",
            Category::Untap => "Untap",
            Category::Install => "Install",
            Category::Remove => "Remove",
        }
    }

    /// Additions go ahead unless refused; removals need an explicit yes
    pub fn default_answer(self) -> DefaultAnswer {
        match self {
            Category::Tap | Category::Install => DefaultAnswer::Yes,
            Category::Untap | Category::Remove => DefaultAnswer::No,
        }
    }
}

/// Graph context for annotating formula prompts
struct Context<'a> {
    graph: &'a DependencyGraph,
    inclusive: HashSet<&'a str>,
}

pub struct Reconciler<R, W> {
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Reconciler<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            prompter: Prompter::new(input, output),
        }
    }

    /// Ask about every difference between `desired` and `live`, then about
    /// `brew update` and `brew upgrade`.
    pub fn run(
        &mut self,
        desired: &DesiredState,
        live: &LiveState,
        graph: &DependencyGraph,
    ) -> Result<ActionPlan> {
        let diff = Diff::compute(desired, live, graph);
        debug!(
            new_taps = diff.taps.new.len(),
            removed_taps = diff.taps.removed.len(),
            new_brews = diff.brews.new.len(),
            missing_brews = diff.brews.missing.len(),
            "computed diff"
        );
        if diff.is_empty() {
            debug!("taps and brews already match the desired state");
        }

        let context = Context {
            graph,
            inclusive: inclusive_brews(&desired.brews, &live.brews),
        };

        let plan = ActionPlan {
            tap: self.walk(Category::Tap, &diff.taps.new, None)?,
            untap: self.walk(Category::Untap, &diff.taps.removed, None)?,
            install: self.walk(Category::Install, &diff.brews.new, Some(&context))?,
            remove: self.walk(Category::Remove, &diff.brews.missing, Some(&context))?,
            update: self.prompter.ask("Update Homebrew?", DefaultAnswer::Yes)?,
            upgrade: self.prompter.ask("Upgrade brews?", DefaultAnswer::No)?,
        };

        debug!(?plan, "reconciled");
        Ok(plan)
    }

    /// Ask about each item in one category and return the accepted ones
    fn walk(
        &mut self,
        category: Category,
        items: &[String],
        context: Option<&Context<'_>>,
    ) -> Result<Vec<String>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        self.prompter
            .say(format!("{} {}", style::header(category.title()), items.join(" ")))?;

        let mut accepted = Vec::new();
        for item in items {
            if let Some(context) = context {
                self.annotate(item, context)?;
            }
            let question = format!("{} {}?", category.verb(), item);
            if self.prompter.ask(&question, category.default_answer())? {
                accepted.push(item.clone());
            }
        }
        Ok(accepted)
    }

    fn annotate(&mut self, name: &str, context: &Context<'_>) -> Result<()> {
        let note = Annotation::for_brew(name, context.graph, &context.inclusive);
        if !note.depends_on.is_empty() {
            self.prompter
                .say(style::relation(name, "is dependent on", &note.depends_on))?;
        }
        if !note.depended_on_by.is_empty() {
            self.prompter
                .say(style::relation(name, "is depended on by", &note.depended_on_by))?;
        }
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn session(answers: &str, desired: DesiredState, live: LiveState) -> (ActionPlan, String) {
        colored::control::set_override(false);
        let graph = DependencyGraph::from_edges(live.edges.clone());
        let mut reconciler = Reconciler::new(Cursor::new(answers.to_string()), Vec::new());
        let plan = reconciler.run(&desired, &live, &graph).unwrap();
        let output = String::from_utf8(reconciler.into_output()).unwrap();
        (plan, output)
    }

    #[test]
    fn test_category_defaults() {
        assert_eq!(Category::Tap.default_answer(), DefaultAnswer::Yes);
        assert_eq!(Category::Install.default_answer(), DefaultAnswer::Yes);
        assert_eq!(Category::Untap.default_answer(), DefaultAnswer::No);
        assert_eq!(Category::Remove.default_answer(), DefaultAnswer::No);
    }

    #[test]
    fn test_defaults_accept_additions_only() {
        let desired = DesiredState {
            taps: names(&["foo/bar"]),
            brews: names(&["wget"]),
        };
        let live = LiveState {
            taps: names(&["old/tap"]),
            brews: names(&["curl"]),
            edges: Vec::new(),
        };
        let (plan, output) = session("", desired, live);

        assert_eq!(plan.tap, ["foo/bar"]);
        assert!(plan.untap.is_empty());
        assert_eq!(plan.install, ["wget"]);
        assert!(plan.remove.is_empty());
        assert!(plan.update);
        assert!(!plan.upgrade);

        assert!(output.contains("** Possibly new taps ** foo/bar"));
        assert!(output.contains("Untap old/tap? [N/n] "));
        assert!(output.contains("Remove curl? [N/n] "));
    }

    #[test]
    fn test_answers_override_defaults() {
        let desired = DesiredState {
            taps: Vec::new(),
            brews: names(&["wget", "jq"]),
        };
        let live = LiveState {
            taps: Vec::new(),
            brews: names(&["curl"]),
            edges: Vec::new(),
        };
        // wget: n, jq: (default), curl: y, update: N, upgrade: Y
        let (plan, _) = session("n\n\ny\nN\nY\n", desired, live);

        assert_eq!(plan.install, ["jq"]);
        assert_eq!(plan.remove, ["curl"]);
        assert!(!plan.update);
        assert!(plan.upgrade);
    }

    #[test]
    fn test_empty_categories_print_nothing() {
        let (plan, output) = session("n\nn\n", DesiredState::default(), LiveState::default());
        assert!(plan.is_empty());
        assert!(!output.contains("**"));
        assert_eq!(output, "Update Homebrew? [Y/y] Upgrade brews? [N/n] ");
    }

    #[test]
    fn test_remove_prompt_shows_dependents() {
        let desired = DesiredState {
            taps: Vec::new(),
            brews: names(&["wget"]),
        };
        let live = LiveState {
            taps: Vec::new(),
            brews: names(&["wget", "openssl@3"]),
            edges: vec![("wget".into(), "openssl@3".into())],
        };
        let (plan, output) = session("", desired, live);

        assert!(plan.remove.is_empty());
        assert!(output.contains("  openssl@3 is depended on by wget\n"));
        assert!(output.contains("Remove openssl@3? [N/n] "));
    }
}
