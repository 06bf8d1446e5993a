use copa::{PageInfo, Pagination};
use nodeql_core::{Entity, Error, Intermediate};
use nodeql_schema::{FieldDef, FieldType, IntoIntermediate, NodeTypeBuilder, ScalarTag, SchemaRegistry};

/// A single edge in a materialized connection: an opaque cursor paired with
/// the element entity it points to.
#[derive(Clone)]
pub struct EdgeEntity {
    /// The opaque cursor identifying this edge's position, conventionally
    /// the stringified id of the element it wraps.
    pub cursor: String,
    /// The wrapped element entity.
    pub node: Entity,
}

impl EdgeEntity {
    /// Pairs a cursor with the entity it identifies.
    pub fn new(cursor: impl Into<String>, node: Entity) -> EdgeEntity {
        EdgeEntity {
            cursor: cursor.into(),
            node,
        }
    }
}

/// A materialized collection wrapper: the edges a producing resolver chose
/// to hand back, plus page info describing where they sit relative to the
/// whole sequence. Producing resolvers build this directly — they already
/// know how to derive a cursor for each of their elements — and the engine
/// only ever slices it in response to pagination calls.
#[derive(Clone)]
pub struct ConnectionEntity {
    /// The edges currently visible through this connection.
    pub edges: Vec<EdgeEntity>,
    /// Pagination metadata describing `edges` relative to the full sequence.
    pub page_info: PageInfo,
}

impl ConnectionEntity {
    /// Wraps a complete, unpaginated sequence of edges.
    pub fn complete(edges: Vec<EdgeEntity>) -> ConnectionEntity {
        ConnectionEntity {
            page_info: PageInfo {
                has_previous_page: false,
                has_next_page: false,
                start_cursor: edges.first().map(|edge| edge.cursor.clone()),
                end_cursor: edges.last().map(|edge| edge.cursor.clone()),
            },
            edges,
        }
    }

    fn paginate(&self, pagination: Pagination) -> ConnectionEntity {
        match pagination {
            Pagination::Forward { first, after } => {
                // `after` is an exclusive start cursor: keep edges strictly past it.
                let start = match after {
                    Some(cursor) => self
                        .edges
                        .iter()
                        .position(|edge| edge.cursor == cursor)
                        .map(|index| index + 1)
                        .unwrap_or(self.edges.len()),
                    None => 0,
                };

                let window = &self.edges[start.min(self.edges.len())..];
                let page: Vec<_> = window.iter().take(first).cloned().collect();
                let has_more = window.len() > first;

                let page_info = PageInfo {
                    has_previous_page: start > 0,
                    has_next_page: has_more,
                    start_cursor: page.first().map(|edge| edge.cursor.clone()),
                    end_cursor: page.last().map(|edge| edge.cursor.clone()),
                };

                ConnectionEntity { edges: page, page_info }
            }
            Pagination::Backward { last, before } => {
                // `before` is an exclusive end cursor: keep edges strictly before it.
                let end = match before {
                    Some(cursor) => self
                        .edges
                        .iter()
                        .position(|edge| edge.cursor == cursor)
                        .unwrap_or(self.edges.len()),
                    None => self.edges.len(),
                };

                let window = &self.edges[..end.min(self.edges.len())];
                let skip = window.len().saturating_sub(last);
                let page = window[skip..].to_vec();

                let page_info = PageInfo {
                    has_previous_page: skip > 0,
                    has_next_page: end < self.edges.len(),
                    start_cursor: page.first().map(|edge| edge.cursor.clone()),
                    end_cursor: page.last().map(|edge| edge.cursor.clone()),
                };

                ConnectionEntity { edges: page, page_info }
            }
        }
    }
}

impl IntoIntermediate for ConnectionEntity {
    fn into_intermediate(self) -> Intermediate {
        Intermediate::entity(self)
    }
}

/// Registers the conventional `{Element}Edge` and `{Element}Connection` node
/// types for a collection of the given element type: `cursor`/`node` on the
/// edge, `count`/`any`/`edges` plus `first`/`after`/`last`/`before` on the
/// connection. Returns the connection type's registered name.
pub fn register_connection_type<C: 'static>(
    registry: &mut SchemaRegistry<C>,
    element_type: &str,
) -> Result<String, Error> {
    let edge_type = format!("{element_type}Edge");
    let connection_type = format!("{element_type}Connection");

    registry.register(
        NodeTypeBuilder::new(edge_type.as_str())
            .field(FieldDef::new("cursor", FieldType::Scalar(ScalarTag::String), |target, _, _| {
                let edge = target.downcast_ref::<EdgeEntity>().expect("EdgeEntity target");
                Ok(Intermediate::value(edge.cursor.clone()))
            }))
            .field(FieldDef::new("node", FieldType::node(element_type), |target, _, _| {
                let edge = target.downcast_ref::<EdgeEntity>().expect("EdgeEntity target");
                Ok(Intermediate::shared_entity(edge.node.clone()))
            }))
            .build(),
    )?;

    registry.register(
        NodeTypeBuilder::new(connection_type.as_str())
            .connection_for(element_type)
            .field(FieldDef::new("count", FieldType::Scalar(ScalarTag::Number), |target, _, _| {
                let connection = target.downcast_ref::<ConnectionEntity>().expect("ConnectionEntity target");
                Ok(Intermediate::value(connection.edges.len()))
            }))
            .field(FieldDef::new("any", FieldType::Scalar(ScalarTag::Boolean), |target, _, _| {
                let connection = target.downcast_ref::<ConnectionEntity>().expect("ConnectionEntity target");
                Ok(Intermediate::value(!connection.edges.is_empty()))
            }))
            .field(FieldDef::new("edges", FieldType::node(edge_type.as_str()), |target, _, _| {
                let connection = target.downcast_ref::<ConnectionEntity>().expect("ConnectionEntity target");
                Ok(Intermediate::collection(connection.edges.clone()))
            }))
            .field(FieldDef::new(
                "first",
                FieldType::node(connection_type.as_str()),
                |target, arguments, _| {
                    let connection = target.downcast_ref::<ConnectionEntity>().expect("ConnectionEntity target");
                    let count = arguments.first().and_then(|literal| literal.as_int()).unwrap_or(0).max(0) as usize;
                    Ok(Intermediate::entity(connection.paginate(Pagination::Forward { first: count, after: None })))
                },
            ))
            .field(FieldDef::new(
                "after",
                FieldType::node(connection_type.as_str()),
                |target, arguments, _| {
                    let connection = target.downcast_ref::<ConnectionEntity>().expect("ConnectionEntity target");
                    let cursor = arguments.first().and_then(|literal| literal.as_str()).map(str::to_owned);
                    Ok(Intermediate::entity(connection.paginate(Pagination::Forward {
                        first: connection.edges.len(),
                        after: cursor,
                    })))
                },
            ))
            .field(FieldDef::new(
                "last",
                FieldType::node(connection_type.as_str()),
                |target, arguments, _| {
                    let connection = target.downcast_ref::<ConnectionEntity>().expect("ConnectionEntity target");
                    let count = arguments.first().and_then(|literal| literal.as_int()).unwrap_or(0).max(0) as usize;
                    Ok(Intermediate::entity(connection.paginate(Pagination::Backward { last: count, before: None })))
                },
            ))
            .field(FieldDef::new(
                "before",
                FieldType::node(connection_type.as_str()),
                |target, arguments, _| {
                    let connection = target.downcast_ref::<ConnectionEntity>().expect("ConnectionEntity target");
                    let cursor = arguments.first().and_then(|literal| literal.as_str()).map(str::to_owned);
                    Ok(Intermediate::entity(connection.paginate(Pagination::Backward {
                        last: connection.edges.len(),
                        before: cursor,
                    })))
                },
            ))
            .build(),
    )?;

    Ok(connection_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(labels: &[&str]) -> Vec<EdgeEntity> {
        labels
            .iter()
            .map(|label| EdgeEntity::new(*label, std::sync::Arc::new(label.to_string())))
            .collect()
    }

    #[test]
    fn first_n_slices_the_front_of_the_sequence() {
        let connection = ConnectionEntity::complete(edges(&["1", "2", "3"]));
        let page = connection.paginate(Pagination::Forward { first: 2, after: None });

        assert_eq!(page.edges.iter().map(|e| e.cursor.as_str()).collect::<Vec<_>>(), vec!["1", "2"]);
        assert!(page.page_info.has_next_page);
        assert!(!page.page_info.has_previous_page);
    }

    #[test]
    fn after_skips_past_the_matching_cursor() {
        let connection = ConnectionEntity::complete(edges(&["1", "2", "3"]));
        let page = connection.paginate(Pagination::Forward {
            first: 10,
            after: Some("1".to_owned()),
        });

        assert_eq!(page.edges.iter().map(|e| e.cursor.as_str()).collect::<Vec<_>>(), vec!["2", "3"]);
    }

    #[test]
    fn last_n_slices_the_back_of_the_sequence() {
        let connection = ConnectionEntity::complete(edges(&["1", "2", "3"]));
        let page = connection.paginate(Pagination::Backward { last: 2, before: None });

        assert_eq!(page.edges.iter().map(|e| e.cursor.as_str()).collect::<Vec<_>>(), vec!["2", "3"]);
        assert!(page.page_info.has_previous_page);
        assert!(!page.page_info.has_next_page);
    }

    #[test]
    fn last_n_before_a_cursor_keeps_only_edges_strictly_before_it() {
        let connection = ConnectionEntity::complete(edges(&["1", "2", "3"]));
        let page = connection.paginate(Pagination::Backward {
            last: 2,
            before: Some("3".to_owned()),
        });

        assert_eq!(page.edges.iter().map(|e| e.cursor.as_str()).collect::<Vec<_>>(), vec!["1", "2"]);
        assert!(!page.page_info.has_previous_page);
        assert!(page.page_info.has_next_page);
    }

    #[test]
    fn before_alone_keeps_every_edge_strictly_before_the_cursor() {
        let connection = ConnectionEntity::complete(edges(&["1", "2", "3"]));
        let page = connection.paginate(Pagination::Backward {
            last: connection.edges.len(),
            before: Some("3".to_owned()),
        });

        assert_eq!(page.edges.iter().map(|e| e.cursor.as_str()).collect::<Vec<_>>(), vec!["1", "2"]);
    }
}
