//! Fixture node types exercised by `mod.rs`: throwaway domain types
//! declared inline next to the tests that drive them, built against the
//! field-declaration macro and the `Query` API.

use std::fmt;

use crate as nodeql;
use crate::{
    node, register_builtin_scalars, register_connection_type, ConnectionEntity, EdgeEntity, FieldType, NodeTypeDerive,
    RootCall, RootResolution, ScalarTag, SchemaRegistry,
};

#[derive(Debug)]
struct NotFound(String);

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFound {}

#[derive(Clone)]
pub struct AppContext {
    pub site_name: String,
}

#[node]
impl AppContext {
    fn site_name(&self) -> String {
        self.site_name.clone()
    }
}

/// Days since the Unix epoch, chainable with `minus_days`.
#[derive(Clone, Copy)]
pub struct Date {
    days: i64,
}

impl Date {
    pub fn new(days: i64) -> Date {
        Date { days }
    }

    /// Civil (year, month, day) from a day count, via Howard Hinnant's
    /// `civil_from_days` algorithm.
    fn civil(&self) -> (i64, u32, u32) {
        let z = self.days + 719468;
        let era = if z >= 0 { z } else { z - 146096 } / 146097;
        let doe = (z - era * 146097) as u64;
        let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
        let y = yoe as i64 + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
        (if m <= 2 { y + 1 } else { y }, m, d)
    }
}

#[node]
impl Date {
    fn minus_days(&self, days: i64) -> Date {
        Date::new(self.days - days)
    }

    fn year(&self) -> i64 {
        self.civil().0
    }

    fn month(&self) -> i64 {
        self.civil().1 as i64
    }

    fn day(&self) -> i64 {
        self.civil().2 as i64
    }
}

/// A struct-shaped node type: fields are read directly off `self` rather
/// than through `#[node]` methods, exercising `#[derive(NodeType)]` instead
/// of the attribute-macro path every other fixture in this file uses.
#[derive(Clone, NodeTypeDerive)]
pub struct Author {
    pub name: String,
    pub handle: String,
}

pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published_at: Date,
    pub author: Author,
}

#[node]
impl Post {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn content(&self) -> String {
        self.content.clone()
    }

    fn published_at(&self) -> Date {
        self.published_at
    }

    fn author(&self) -> Author {
        self.author.clone()
    }

    #[field(returns = "CommentConnection")]
    fn comments(&self) -> ConnectionEntity {
        let edges = all_comments()
            .into_iter()
            .filter(|comment| comment.post_id == self.id)
            .map(|comment| EdgeEntity::new(comment.id.to_string(), std::sync::Arc::new(comment)))
            .collect();
        ConnectionEntity::complete(edges)
    }
}

pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub rating: i64,
}

#[node]
impl Comment {
    fn id(&self) -> i64 {
        self.id
    }

    fn content(&self) -> String {
        self.content.clone()
    }

    fn rating(&self) -> i64 {
        self.rating
    }

    fn letters(&self) -> String {
        self.content.clone()
    }
}

fn all_posts() -> Vec<Post> {
    vec![Post {
        id: 123,
        title: "My great post".to_owned(),
        content: "So many great things".to_owned(),
        // 2010-01-04
        published_at: Date::new(14613),
        author: Author {
            name: "Dana Voss".to_owned(),
            handle: "dvoss".to_owned(),
        },
    }]
}

fn all_comments() -> Vec<Comment> {
    vec![
        Comment {
            id: 444,
            post_id: 123,
            content: "I agree".to_owned(),
            rating: 5,
        },
        Comment {
            id: 445,
            post_id: 123,
            content: "I disagree".to_owned(),
            rating: 1,
        },
    ]
}

pub fn build_registry() -> SchemaRegistry<AppContext> {
    let mut registry = SchemaRegistry::new();
    register_builtin_scalars(&mut registry).unwrap();

    registry.register(Date::node_type()).unwrap();
    registry.register(Author::node_type()).unwrap();
    registry.register(Post::node_type()).unwrap();
    registry.register(Comment::node_type()).unwrap();
    registry.register(AppContext::node_type()).unwrap();
    register_connection_type(&mut registry, "Comment").unwrap();

    registry.register_root_call(RootCall::new(
        "post",
        vec![("id".to_owned(), FieldType::Scalar(ScalarTag::Number))],
        "Post",
        |arguments, _: &AppContext| {
            let id = arguments.first().and_then(|literal| literal.as_int()).unwrap_or(0);
            all_posts()
                .into_iter()
                .find(|post| post.id == id)
                .map(RootResolution::one)
                .ok_or_else(|| nodeql::Error::resolver(NotFound(format!("no such post: {id}"))))
        },
    ));

    registry.register_root_call(RootCall::new(
        "comment",
        vec![("id".to_owned(), FieldType::Scalar(ScalarTag::Number))],
        "Comment",
        |arguments, _: &AppContext| {
            let comments: Result<Vec<_>, nodeql::Error> = arguments
                .iter()
                .map(|literal| {
                    let id = literal.as_int().unwrap_or(0);
                    all_comments()
                        .into_iter()
                        .find(|comment| comment.id == id)
                        .ok_or_else(|| nodeql::Error::resolver(NotFound(format!("no such comment: {id}"))))
                })
                .collect();
            Ok(RootResolution::many(comments?))
        },
    ));

    nodeql::register_context_call(&mut registry, "AppContext");

    registry
}
