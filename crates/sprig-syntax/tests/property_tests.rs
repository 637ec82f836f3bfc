//! Property tests for the lexer and tree builder.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sprig_syntax::{
    Node, ParseOptions, TagMatching, Token, build_tree, parse, parse_with_options, tokenize,
};

const MAX_DEPTH: usize = 5;
const NAME_CHARS: &[char] = &['a', 'b', 'd', 'i', 'p', 's', 'v', '-', '1'];
const TEXT_CHARS: &[char] = &['x', 'y', ' ', '\n', '/', '>', 'é', '&'];
const MARKUP_CHARS: &[char] = &['<', '>', '/', 'a', 'b', ' '];

/// A well-formed template, described by the tree it should parse into.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    Element(String, Vec<Shape>),
    Text(String),
}

#[derive(Debug, Clone)]
struct Forest(Vec<Shape>);

impl Arbitrary for Forest {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(arbitrary_children(g, 0))
    }
}

/// Adjacent text shapes are merged, since the lexer emits one text token
/// per run.
fn arbitrary_children(g: &mut Gen, depth: usize) -> Vec<Shape> {
    let count = usize::arbitrary(g) % 4;
    let mut children: Vec<Shape> = Vec::new();
    for _ in 0..count {
        if depth < MAX_DEPTH && bool::arbitrary(g) {
            let name = arbitrary_string(g, NAME_CHARS, 1, 6);
            children.push(Shape::Element(name, arbitrary_children(g, depth + 1)));
        } else {
            let content = arbitrary_string(g, TEXT_CHARS, 1, 8);
            if let Some(Shape::Text(previous)) = children.last_mut() {
                previous.push_str(&content);
            } else {
                children.push(Shape::Text(content));
            }
        }
    }
    children
}

fn arbitrary_string(g: &mut Gen, alphabet: &[char], min: usize, max: usize) -> String {
    let len = min + usize::arbitrary(g) % (max - min + 1);
    (0..len).map(|_| *g.choose(alphabet).unwrap()).collect()
}

/// Arbitrary short strings over the characters the lexer cares about.
#[derive(Debug, Clone)]
struct Markup(String);

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(arbitrary_string(g, MARKUP_CHARS, 0, 24))
    }
}

fn render(shapes: &[Shape], out: &mut String) {
    for shape in shapes {
        match shape {
            Shape::Element(name, children) => {
                out.push('<');
                out.push_str(name);
                out.push('>');
                render(children, out);
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
            Shape::Text(content) => out.push_str(content),
        }
    }
}

fn shape_of(nodes: &[Node]) -> Vec<Shape> {
    nodes
        .iter()
        .map(|node| match node {
            Node::Element(el) => Shape::Element(el.tag.clone(), shape_of(&el.children)),
            Node::Text(t) => Shape::Text(t.content.clone()),
        })
        .collect()
}

fn shape_depth(shapes: &[Shape]) -> usize {
    shapes
        .iter()
        .map(|shape| match shape {
            Shape::Element(_, children) => 1 + shape_depth(children),
            Shape::Text(_) => 0,
        })
        .max()
        .unwrap_or(0)
}

fn spans_cover_their_elements(input: &str, nodes: &[Node]) -> bool {
    nodes.iter().all(|node| match node {
        Node::Element(el) => {
            let source = &input[el.span.range()];
            source.starts_with(&format!("<{}>", el.tag))
                && source.ends_with(&format!("</{}>", el.tag))
                && spans_cover_their_elements(input, &el.children)
        }
        Node::Text(t) => input[t.span.range()] == t.content,
    })
}

#[quickcheck]
fn prop_round_trip_nesting(forest: Forest) -> bool {
    let mut input = String::new();
    render(&forest.0, &mut input);
    match parse(&input) {
        Ok(root) => shape_of(&root.children) == forest.0 && root.depth() == shape_depth(&forest.0),
        Err(_) => false,
    }
}

#[quickcheck]
fn prop_spans_point_at_source(forest: Forest) -> bool {
    let mut input = String::new();
    render(&forest.0, &mut input);
    parse(&input).is_ok_and(|root| spans_cover_their_elements(&input, &root.children))
}

#[quickcheck]
fn prop_element_count_matches_tag_open_tokens(markup: Markup) -> bool {
    let Ok(tokens) = tokenize(&markup.0) else {
        return true;
    };
    let opens = tokens
        .iter()
        .filter(|token| matches!(token, Token::TagOpen { .. }))
        .count();
    [TagMatching::Strict, TagMatching::Lenient]
        .into_iter()
        .all(|mode| {
            let options = ParseOptions::default().with_tag_matching(mode);
            build_tree(&tokens, options).map_or(true, |root| root.element_count() == opens)
        })
}

#[quickcheck]
fn prop_tokens_render_back_to_input(markup: Markup) -> bool {
    let input = markup.0;
    match tokenize(&input) {
        Ok(tokens) => {
            let rendered: String = tokens.iter().map(ToString::to_string).collect();
            rendered == input
                && tokens
                    .iter()
                    .all(|token| input[token.span().range()] == token.to_string())
        }
        Err(err) => {
            let span = err.span();
            span.end == input.len() && input[span.start..].starts_with('<')
        }
    }
}

#[quickcheck]
fn prop_lenient_accepts_whatever_strict_accepts(markup: Markup) -> bool {
    match parse(&markup.0) {
        Ok(strict) => parse_with_options(&markup.0, ParseOptions::lenient())
            .is_ok_and(|lenient| lenient == strict),
        Err(_) => true,
    }
}
