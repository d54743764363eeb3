/*!
 * Arena for assembling nested environments.
 *
 * Environments are added top-down and content is dropped into whichever
 * environment is innermost. Each slot records its parent so the outermost
 * ancestor can be recovered; `build` then turns the arena into an owned
 * `Environment` tree.
 */

use super::model::{Environment, LatexNode};

/// Handle to an environment inside an `EnvironmentTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvId(usize);

#[derive(Debug)]
enum Child {
    Env(EnvId),
    Node(LatexNode),
}

#[derive(Debug)]
struct Slot {
    name: String,
    args: Vec<String>,
    parent: Option<EnvId>,
    children: Vec<Child>,
}

#[derive(Debug, Default)]
pub struct EnvironmentTree {
    slots: Vec<Slot>,
}

impl EnvironmentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level environment
    pub fn add_root(&mut self, name: &str, args: &[&str]) -> EnvId {
        self.push_slot(name, args, None)
    }

    /// Add an environment nested as the next child of `parent`
    pub fn add_environment(&mut self, parent: EnvId, name: &str, args: &[&str]) -> EnvId {
        let id = self.push_slot(name, args, Some(parent));
        self.slots[parent.0].children.push(Child::Env(id));
        id
    }

    /// Append a leaf node to an environment
    pub fn add_content(&mut self, env: EnvId, node: impl Into<LatexNode>) {
        self.slots[env.0].children.push(Child::Node(node.into()));
    }

    pub fn parent(&self, env: EnvId) -> Option<EnvId> {
        self.slots[env.0].parent
    }

    pub fn name(&self, env: EnvId) -> &str {
        &self.slots[env.0].name
    }

    /// Outermost environment enclosing `env` (itself when top-level)
    pub fn top_ancestor(&self, env: EnvId) -> EnvId {
        let mut current = env;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Consume the arena, producing the owned tree rooted at `root`
    pub fn build(mut self, root: EnvId) -> Environment {
        self.take(root)
    }

    fn push_slot(&mut self, name: &str, args: &[&str], parent: Option<EnvId>) -> EnvId {
        self.slots.push(Slot {
            name: name.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            parent,
            children: Vec::new(),
        });
        EnvId(self.slots.len() - 1)
    }

    fn take(&mut self, id: EnvId) -> Environment {
        let slot = &mut self.slots[id.0];
        let name = std::mem::take(&mut slot.name);
        let args = std::mem::take(&mut slot.args);
        let children = std::mem::take(&mut slot.children);

        let children = children
            .into_iter()
            .map(|child| match child {
                Child::Env(child_id) => LatexNode::Environment(self.take(child_id)),
                Child::Node(node) => node,
            })
            .collect();

        Environment { name, args, children }
    }
}
