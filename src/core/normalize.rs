/// Normalization — comma restoration, case folding, and text rendering.
use crate::core::token::{strip_comma_marker, Node};

/// Punctuation that attaches to the preceding word when rendered.
const PUNCTUATION: &[char] = &['.', '!', '?', ',', ';', ':'];

/// Restore commas and fold case on every word of the tree.
///
/// Commas are restored before folding because the marker is upper case.
pub fn normalize(tree: &Node) -> Node {
    match tree {
        Node::Word(w) => Node::Word(normalize_word(w)),
        Node::Group(children) => Node::Group(children.iter().map(normalize).collect()),
    }
}

fn normalize_word(word: &str) -> String {
    let (base, had_comma) = strip_comma_marker(word);
    let restored = if had_comma {
        format!("{},", base)
    } else {
        base.to_string()
    };
    restored.to_lowercase()
}

/// Flatten a tree into printable text.
///
/// Words are joined by spaces, nested groups are parenthesized, and words
/// made only of punctuation are fused onto whatever precedes them. The root
/// group is not wrapped in parentheses.
pub fn render(tree: &Node) -> String {
    let mut out = String::new();
    match tree {
        Node::Word(w) => out.push_str(w),
        Node::Group(children) => render_children(children, &mut out),
    }
    out
}

fn render_children(children: &[Node], out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let attach = matches!(child, Node::Word(w) if is_punctuation(w));
        if i > 0 && !attach {
            out.push(' ');
        }
        match child {
            Node::Word(w) => out.push_str(w),
            Node::Group(inner) => {
                out.push('(');
                render_children(inner, out);
                out.push(')');
            }
        }
    }
}

fn is_punctuation(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| PUNCTUATION.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Node {
        Node::word(s)
    }

    #[test]
    fn folds_case_everywhere() {
        let tree = Node::group(vec![w("PASTA"), Node::group(vec![w("And"), w("SAUCE")])]);
        assert_eq!(
            normalize(&tree),
            Node::group(vec![w("pasta"), Node::group(vec![w("and"), w("sauce")])])
        );
    }

    #[test]
    fn restores_comma_on_tagged_word_only() {
        let tree = Node::group(vec![w("heated_COMMA"), w("SAUCE_COMMA"), w("served")]);
        assert_eq!(
            normalize(&tree),
            Node::group(vec![w("heated,"), w("sauce,"), w("served")])
        );
    }

    #[test]
    fn standalone_marker_becomes_comma() {
        assert_eq!(normalize(&Node::comma()), w(","));
    }

    #[test]
    fn lower_case_marker_is_not_a_comma() {
        assert_eq!(normalize(&w("odd_comma")), w("odd_comma"));
    }

    #[test]
    fn normalize_is_idempotent() {
        let tree = Node::group(vec![
            w("MACARONI_COMMA"),
            Node::comma(),
            Node::group(vec![w("Al_COMMA"), Node::empty()]),
        ]);
        let once = normalize(&tree);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn render_joins_and_parenthesizes() {
        let tree = Node::group(vec![
            w("pasta"),
            Node::group(vec![w("and"), w("sauce")]),
            w("tonight"),
        ]);
        assert_eq!(render(&tree), "pasta (and sauce) tonight");
    }

    #[test]
    fn render_fuses_standalone_comma() {
        let tree = Node::group(vec![
            Node::group(vec![w("aged"), w("cheese")]),
            w(","),
            w("served"),
        ]);
        assert_eq!(render(&tree), "(aged cheese), served");
    }

    #[test]
    fn render_empty_and_word() {
        assert_eq!(render(&Node::empty()), "");
        assert_eq!(render(&w("macaroni")), "macaroni");
        assert_eq!(render(&Node::group(vec![Node::empty()])), "()");
    }
}
