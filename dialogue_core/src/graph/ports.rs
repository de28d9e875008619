//! Port registry - the ordered output sockets of each node and the port -> owner index.

use tracing::debug;

use dialogue_model::{NodeId, Port, PortId};

use super::{DialogueGraph, GraphError};

impl DialogueGraph {
    /// Get any port in the graph by handle.
    pub fn port(&self, port: PortId) -> Option<&Port> {
        let owner = self.port_owner.get(&port)?;
        self.nodes.get(owner)?.port(port)
    }

    /// Get the node owning a port.
    pub fn port_owner(&self, port: PortId) -> Option<&NodeId> {
        self.port_owner.get(&port)
    }

    pub(super) fn require_port_owner(&self, port: PortId) -> Result<&NodeId, GraphError> {
        self.port_owner
            .get(&port)
            .ok_or(GraphError::PortNotFound(port))
    }

    /// Append an output port to a node.
    ///
    /// Without a name the port is called `"Output {n}"`, `n` being the number of
    /// outputs the node had before this one.
    pub fn add_output_port(&mut self, node: &NodeId, name: Option<&str>) -> Result<PortId, GraphError> {
        let owner = self
            .nodes
            .get_mut(node)
            .ok_or_else(|| GraphError::NodeNotFound(node.clone()))?;
        if owner.is_entry {
            return Err(GraphError::EntryNodeProtected {
                node: node.clone(),
                action: "given new ports",
            });
        }

        let name = match name {
            Some(name) => name.to_string(),
            None => format!("Output {}", owner.outputs.len()),
        };
        let port = Port::output(node.clone(), name);
        let id = port.id;
        debug!(node = %node, port = %id, name = %port.name, "added output port");

        owner.outputs.push(port);
        self.port_owner.insert(id, node.clone());
        Ok(id)
    }

    /// Remove an output port, detaching any edge leaving through it first.
    ///
    /// Returns `Ok(false)` when the node or port does not exist.
    pub fn remove_output_port(&mut self, node: &NodeId, port: PortId) -> Result<bool, GraphError> {
        let Some(owner) = self.nodes.get(node) else {
            return Ok(false);
        };
        if owner.is_entry {
            return Err(GraphError::EntryNodeProtected {
                node: node.clone(),
                action: "stripped of ports",
            });
        }
        if owner.output(port).is_none() {
            return Ok(false);
        }

        self.edges.retain(|e| e.source_port != port);

        if let Some(owner) = self.nodes.get_mut(node) {
            owner.outputs.retain(|p| p.id != port);
        }
        self.port_owner.remove(&port);
        debug!(node = %node, port = %port, "removed output port");
        Ok(true)
    }

    /// Rename an output port. Names are labels only and may repeat.
    pub fn rename_port(&mut self, port: PortId, name: impl Into<String>) -> Result<(), GraphError> {
        let owner_id = self.require_port_owner(port)?.clone();
        let owner = self
            .nodes
            .get_mut(&owner_id)
            .ok_or_else(|| GraphError::NodeNotFound(owner_id.clone()))?;
        if owner.is_entry {
            return Err(GraphError::EntryNodeProtected {
                node: owner_id,
                action: "renamed",
            });
        }
        let target = owner
            .outputs
            .iter_mut()
            .find(|p| p.id == port)
            .ok_or(GraphError::NotAnOutputPort(port))?;
        target.name = name.into();
        Ok(())
    }

    /// Every port a connection started at `start` may end on: anything that
    /// is neither `start` itself nor owned by the same node.
    ///
    /// Direction is not checked here; `connect` enforces it.
    pub fn compatible_ports(&self, start: PortId) -> Result<Vec<PortId>, GraphError> {
        let start_owner = self.require_port_owner(start)?;
        Ok(self
            .nodes()
            .filter(|node| &node.id != start_owner)
            .flat_map(|node| node.ports())
            .map(|port| port.id)
            .filter(|id| *id != start)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_port_names() {
        let mut graph = DialogueGraph::new();
        let node = graph.create_node("Question");

        graph.add_output_port(&node, None).unwrap();
        graph.add_output_port(&node, Some("Maybe")).unwrap();
        graph.add_output_port(&node, None).unwrap();

        let names: Vec<_> = graph
            .node(&node)
            .unwrap()
            .outputs
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Output 0", "Maybe", "Output 2"]);
    }

    #[test]
    fn test_add_port_to_missing_node() {
        let mut graph = DialogueGraph::new();
        let result = graph.add_output_port(&NodeId::from("ghost"), None);
        assert_eq!(result, Err(GraphError::NodeNotFound(NodeId::from("ghost"))));
    }

    #[test]
    fn test_entry_ports_are_fixed() {
        let mut graph = DialogueGraph::new();
        let entry = graph.entry_node().unwrap().id.clone();
        let next = graph.entry_node().unwrap().outputs[0].id;

        assert!(graph.add_output_port(&entry, None).is_err());
        assert!(graph.remove_output_port(&entry, next).is_err());
        assert!(graph.rename_port(next, "later").is_err());
        assert_eq!(graph.entry_node().unwrap().outputs.len(), 1);
    }

    #[test]
    fn test_remove_port_detaches_edge() {
        let mut graph = DialogueGraph::new();
        let a = graph.create_node("A");
        let b = graph.create_node("B");
        let out = graph.add_output_port(&a, None).unwrap();
        let input = graph.node(&b).unwrap().input.as_ref().unwrap().id;
        graph.connect(out, input).unwrap();

        assert!(graph.remove_output_port(&a, out).unwrap());

        assert_eq!(graph.edge_count(), 0);
        assert!(graph.edges().all(|e| !e.uses_port(out)));
        assert!(graph.port(out).is_none());
        assert!(graph.node(&a).unwrap().outputs.is_empty());
    }

    #[test]
    fn test_remove_port_keeps_other_edges() {
        let mut graph = DialogueGraph::new();
        let a = graph.create_node("A");
        let b = graph.create_node("B");
        let yes = graph.add_output_port(&a, Some("Yes")).unwrap();
        let no = graph.add_output_port(&a, Some("Yes")).unwrap();
        let input = graph.node(&b).unwrap().input.as_ref().unwrap().id;
        graph.connect(yes, input).unwrap();
        graph.connect(no, input).unwrap();

        graph.remove_output_port(&a, yes).unwrap();

        // Same name, different port: the second edge survives
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges().next().unwrap().source_port, no);
    }

    #[test]
    fn test_remove_missing_port_is_noop() {
        let mut graph = DialogueGraph::new();
        let a = graph.create_node("A");
        let out = graph.add_output_port(&a, None).unwrap();

        assert!(graph.remove_output_port(&a, out).unwrap());
        assert!(!graph.remove_output_port(&a, out).unwrap());
        assert!(!graph.remove_output_port(&NodeId::from("ghost"), out).unwrap());
    }

    #[test]
    fn test_rename_port() {
        let mut graph = DialogueGraph::new();
        let a = graph.create_node("A");
        let out = graph.add_output_port(&a, None).unwrap();

        graph.rename_port(out, "Accept").unwrap();
        assert_eq!(graph.port(out).unwrap().name, "Accept");

        let input = graph.node(&a).unwrap().input.as_ref().unwrap().id;
        assert_eq!(graph.rename_port(input, "x"), Err(GraphError::NotAnOutputPort(input)));
    }

    #[test]
    fn test_compatible_ports_exclude_own_node() {
        let mut graph = DialogueGraph::new();
        let a = graph.create_node("A");
        let b = graph.create_node("B");
        let a_out = graph.add_output_port(&a, None).unwrap();
        graph.add_output_port(&b, None).unwrap();

        let compatible = graph.compatible_ports(a_out).unwrap();

        assert!(!compatible.contains(&a_out));
        for port in &compatible {
            assert_ne!(graph.port_owner(*port), Some(&a));
        }
        // entry "next" + B input + B output
        assert_eq!(compatible.len(), 3);
    }

    #[test]
    fn test_compatible_ports_unknown_start() {
        let graph = DialogueGraph::new();
        let ghost = PortId::new();
        assert_eq!(graph.compatible_ports(ghost), Err(GraphError::PortNotFound(ghost)));
    }
}
