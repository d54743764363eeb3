/*!
 * LaTeX writer for regenerated gloss examples.
 *
 * - `model`: documents, declarations, commands and environments
 * - `expex`: `\ex`/`\pex` examples and `\begingl` gloss blocks
 * - `tree`: arena used to assemble nested environments
 */

pub mod expex;
pub mod model;
pub mod tree;

pub use expex::{Example, ExamplePart, GlossedExampleBlock};
pub use model::{Command, Declaration, DeclarationKind, Document, Environment, LatexNode};
pub use tree::{EnvId, EnvironmentTree};
