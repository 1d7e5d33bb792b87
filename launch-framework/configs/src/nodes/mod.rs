pub mod node;

pub use node::{NodeDescriptor, NodePosition, build_node, node_base_path};
