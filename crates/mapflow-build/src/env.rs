//! Lexical environments for the graph walk.
//!
//! An [`Environment`] records the scope active while the builder traverses a
//! projector body: the projector's name, its positional argument bindings,
//! and the targets and local variables written so far. Environments live in
//! an arena owned by the builder and are addressed by [`EnvId`]; nothing is
//! ever removed, so ids stay valid for the whole build.
//!
//! Scope crossing is deliberately narrow: only environments introduced by
//! anonymous block closures keep a parent link, so variable lookup escapes
//! a block into its enclosing body but never crosses a normal projector
//! call. Regular projector bodies are hermetic.

use std::rc::Rc;

use mapflow_core::{resolve_path, ArgLineage, ChildTargets, TargetLineage};

/// Scope name of the top-level mapping body.
pub const ROOT_CONTEXT: &str = "root";

/// Prefix of projector names generated for anonymous block closures.
pub const ANON_BLOCK_PREFIX: &str = "$anon_block_";

/// Index of an environment in the builder's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvId(usize);

/// One lexical scope.
#[derive(Debug)]
pub struct Environment {
    /// The enclosing projector's name, `"root"` at top level.
    pub name: String,
    /// Enclosing scope, present only for anonymous block closures.
    pub parent: Option<EnvId>,
    /// Positional argument bindings; slot `i` holds the bindings of argument
    /// `i + 1`. A slot carries several entries when the call site resolved
    /// to more than one candidate.
    pub args: Vec<Vec<ArgLineage>>,
    /// Targets written so far in this body, by name, in write order.
    pub targets: ChildTargets,
    /// Local variables bound so far in this body, by name, in write order.
    pub vars: ChildTargets,
}

/// The arena of all environments created during one build.
#[derive(Debug, Default)]
pub struct EnvArena {
    envs: Vec<Environment>,
}

impl EnvArena {
    pub fn new() -> Self {
        EnvArena::default()
    }

    /// Creates the top-level scope: named `root`, no parent, no bindings.
    pub fn new_root(&mut self) -> EnvId {
        self.push(Environment {
            name: ROOT_CONTEXT.to_string(),
            parent: None,
            args: Vec::new(),
            targets: ChildTargets::new(),
            vars: ChildTargets::new(),
        })
    }

    /// Creates the scope of a projector body. The parent link is retained
    /// only for anonymous block closures; everything else starts hermetic.
    pub fn new_projector(
        &mut self,
        parent: EnvId,
        proj_name: &str,
        args: Vec<Vec<ArgLineage>>,
    ) -> EnvId {
        let parent = proj_name.starts_with(ANON_BLOCK_PREFIX).then_some(parent);
        self.push(Environment {
            name: proj_name.to_string(),
            parent,
            args,
            targets: ChildTargets::new(),
            vars: ChildTargets::new(),
        })
    }

    pub fn get(&self, id: EnvId) -> &Environment {
        &self.envs[id.0]
    }

    /// Records a finalized target (or local variable) lineage in a scope.
    pub fn record_target(
        &mut self,
        id: EnvId,
        name: &str,
        is_variable: bool,
        lineage: Rc<TargetLineage>,
    ) {
        let env = &mut self.envs[id.0];
        let table = if is_variable {
            &mut env.vars
        } else {
            &mut env.targets
        };
        table.entry(name.to_string()).or_default().push(lineage);
    }

    /// Resolves a variable path in a scope, falling back to the parent chain
    /// when the head is unbound locally. Returns `None` when the chain is
    /// exhausted without matching the head.
    pub fn lookup_vars(&self, id: EnvId, path: &[&str]) -> Option<Vec<Rc<TargetLineage>>> {
        let mut current = Some(id);
        while let Some(env_id) = current {
            let env = self.get(env_id);
            if let Some(found) = resolve_path(&env.vars, path) {
                return Some(found);
            }
            current = env.parent;
        }
        None
    }

    fn push(&mut self, env: Environment) -> EnvId {
        self.envs.push(env);
        EnvId(self.envs.len() - 1)
    }
}
