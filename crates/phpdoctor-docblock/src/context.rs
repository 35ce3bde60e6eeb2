//! Native type context around one doc comment
//!
//! Rules that compare PHPDoc types against native declarations need the
//! enclosing namespace, the file's `use` imports, and the documented
//! element's own declaration (parameter list, return type, property type).
//! All of it is recovered from the token stream; declarations that cannot
//! be recognized simply leave the corresponding field empty, which reads
//! as "cannot prove anything" downstream.

use std::collections::HashMap;

use phpdoctor_core::{Token, TokenKind};

/// One declared parameter of the documented function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeParam {
    /// Name without `$`
    pub name: String,
    /// Native type text as written (`?Foo`, `int|string`, ...)
    pub ty: Option<String>,
    /// Whether the parameter defaults to `null`
    pub default_is_null: bool,
}

/// Native declarations visible to one doc comment
#[derive(Debug, Clone, Default)]
pub struct TypeContext {
    /// Current namespace, if any
    pub namespace: Option<String>,
    /// Lowercased alias -> fully qualified name (no leading `\`)
    pub imports: HashMap<String, String>,
    /// Fully qualified name of the enclosing class-like, if any
    pub class_fqcn: Option<String>,
    /// Parameters of the documented function, in declaration order
    pub params: Vec<NativeParam>,
    /// Native return type of the documented function
    pub return_type: Option<String>,
    /// Native type of the documented property
    pub property_type: Option<String>,
}

impl TypeContext {
    pub fn param(&self, name: &str) -> Option<&NativeParam> {
        self.params.iter().find(|p| p.name == name)
    }
}

const MODIFIERS: &[&str] = &[
    "abstract", "final", "public", "protected", "private", "static", "readonly", "var",
];

/// Build the type context for the doc comment at token `doc_index`
pub fn extract(tokens: &[Token], doc_index: usize) -> TypeContext {
    let mut ctx = TypeContext::default();
    scan_preamble(tokens, doc_index, &mut ctx);
    scan_declaration(tokens, doc_index, &mut ctx);
    ctx
}

/// Namespace, imports and enclosing class from the tokens before the doc
fn scan_preamble(tokens: &[Token], doc_index: usize, ctx: &mut TypeContext) {
    let mut i = 0;
    while i < doc_index {
        let token = &tokens[i];
        if token.kind != TokenKind::Word {
            i += 1;
            continue;
        }

        if token.is_keyword("namespace") {
            let (name, next) = read_name(tokens, i + 1);
            if !name.is_empty() {
                ctx.namespace = Some(name);
            }
            i = next;
        } else if token.is_keyword("use") {
            i = read_import(tokens, i + 1, ctx);
        } else if token.is_keyword("class")
            || token.is_keyword("interface")
            || token.is_keyword("trait")
            || token.is_keyword("enum")
        {
            if let Some(name_token) = next_significant(tokens, i + 1) {
                if tokens[name_token].kind == TokenKind::Word {
                    let name = &tokens[name_token].text;
                    ctx.class_fqcn = Some(match &ctx.namespace {
                        Some(ns) => format!("{}\\{}", ns, name),
                        None => name.clone(),
                    });
                }
            }
            i += 1;
        } else {
            i += 1;
        }
    }
}

/// Read a `\`-separated name starting at `from`; returns (name, next index)
fn read_name(tokens: &[Token], from: usize) -> (String, usize) {
    let mut name = String::new();
    let mut i = from;
    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind {
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment => {
                if !name.is_empty() {
                    break;
                }
            }
            TokenKind::Word => name.push_str(&token.text),
            TokenKind::Punct if token.text == "\\" => name.push('\\'),
            _ => break,
        }
        i += 1;
    }
    (name, i)
}

/// Parse one `use Foo\Bar as Baz;` statement. Group imports and
/// function/const imports are skipped. Returns the index to resume at.
fn read_import(tokens: &[Token], from: usize, ctx: &mut TypeContext) -> usize {
    let (mut path, mut i) = read_name(tokens, from);
    if path.is_empty() || path.eq_ignore_ascii_case("function") || path.eq_ignore_ascii_case("const") {
        return i;
    }
    path = path.trim_start_matches('\\').to_string();

    let mut alias = path.rsplit('\\').next().unwrap_or(&path).to_string();
    if let Some(as_token) = next_significant(tokens, i) {
        if tokens[as_token].is_keyword("as") {
            if let Some(alias_token) = next_significant(tokens, as_token + 1) {
                if tokens[alias_token].kind == TokenKind::Word {
                    alias = tokens[alias_token].text.clone();
                    i = alias_token + 1;
                }
            }
        }
    }

    ctx.imports.insert(alias.to_ascii_lowercase(), path);
    i
}

/// Signature / property type of the declaration after the doc comment
fn scan_declaration(tokens: &[Token], doc_index: usize, ctx: &mut TypeContext) {
    let mut i = doc_index + 1;
    let mut type_parts: Vec<String> = Vec::new();

    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind {
            TokenKind::Whitespace
            | TokenKind::LineComment
            | TokenKind::BlockComment
            | TokenKind::Attribute => {
                i += 1;
            }
            TokenKind::Word if MODIFIERS.iter().any(|m| token.is_keyword(m)) => {
                i += 1;
            }
            TokenKind::Word if token.is_keyword("function") => {
                scan_function(tokens, i + 1, ctx);
                return;
            }
            TokenKind::Word => {
                // Part of a property's native type
                type_parts.push(token.text.clone());
                i += 1;
            }
            TokenKind::Punct if matches!(token.text.as_str(), "\\" | "?" | "|" | "&" | "(" | ")") => {
                type_parts.push(token.text.clone());
                i += 1;
            }
            TokenKind::Variable => {
                if !type_parts.is_empty() {
                    ctx.property_type = Some(type_parts.concat());
                }
                return;
            }
            _ => return,
        }
    }
}

/// Parse a parameter list and return type starting after `function`
fn scan_function(tokens: &[Token], from: usize, ctx: &mut TypeContext) {
    // Skip the function name (and a by-ref `&`)
    let mut i = from;
    while i < tokens.len() {
        match tokens[i].kind {
            TokenKind::Whitespace | TokenKind::Word => i += 1,
            TokenKind::Punct if tokens[i].text == "&" => i += 1,
            _ => break,
        }
    }
    if i >= tokens.len() || tokens[i].text != "(" {
        return;
    }
    i += 1;

    let mut depth = 1usize;
    let mut type_parts: Vec<String> = Vec::new();
    let mut current: Option<NativeParam> = None;
    let mut in_default = false;
    let mut default_is_null = false;

    while i < tokens.len() && depth > 0 {
        let token = &tokens[i];
        match token.kind {
            TokenKind::Punct if token.text == "(" => {
                depth += 1;
                if !in_default {
                    type_parts.push("(".to_string());
                }
            }
            TokenKind::Punct if token.text == ")" => {
                depth -= 1;
                if depth == 0 {
                    if let Some(mut param) = current.take() {
                        param.default_is_null = default_is_null;
                        ctx.params.push(param);
                    }
                } else if !in_default {
                    type_parts.push(")".to_string());
                }
            }
            TokenKind::Punct if token.text == "," && depth == 1 => {
                if let Some(mut param) = current.take() {
                    param.default_is_null = default_is_null;
                    ctx.params.push(param);
                }
                type_parts.clear();
                in_default = false;
                default_is_null = false;
            }
            TokenKind::Punct if token.text == "=" && depth == 1 => {
                in_default = true;
            }
            TokenKind::Variable if !in_default && current.is_none() => {
                // By-ref and variadic markers are not part of the type
                while type_parts.last().map(String::as_str) == Some("&")
                    || type_parts.last().map(String::as_str) == Some(".")
                {
                    type_parts.pop();
                }
                current = Some(NativeParam {
                    name: token.text.trim_start_matches('$').to_string(),
                    ty: if type_parts.is_empty() {
                        None
                    } else {
                        Some(type_parts.concat())
                    },
                    default_is_null: false,
                });
            }
            TokenKind::Word if in_default => {
                if token.is_keyword("null") {
                    default_is_null = true;
                }
            }
            TokenKind::Word if !in_default => {
                // Promoted-constructor visibility keywords are not types
                if !MODIFIERS.iter().any(|m| token.is_keyword(m)) {
                    type_parts.push(token.text.clone());
                }
            }
            TokenKind::Punct if !in_default => type_parts.push(token.text.clone()),
            _ => {}
        }
        i += 1;
    }

    // Return type: `): Type` up to `{` or `;`
    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind {
            TokenKind::Whitespace => i += 1,
            TokenKind::Punct if token.text == ":" => {
                i += 1;
                let mut parts: Vec<String> = Vec::new();
                while i < tokens.len() {
                    let t = &tokens[i];
                    match t.kind {
                        TokenKind::Whitespace => {}
                        TokenKind::Word => parts.push(t.text.clone()),
                        TokenKind::Punct if matches!(t.text.as_str(), "\\" | "?" | "|" | "&" | "(" | ")") => {
                            parts.push(t.text.clone())
                        }
                        _ => break,
                    }
                    i += 1;
                }
                if !parts.is_empty() {
                    ctx.return_type = Some(parts.concat());
                }
                return;
            }
            _ => return,
        }
    }
}

fn next_significant(tokens: &[Token], from: usize) -> Option<usize> {
    tokens[from..].iter().position(|t| {
        !matches!(
            t.kind,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }).map(|rel| from + rel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phpdoctor_core::tokenize;

    fn context_for(source: &str) -> TypeContext {
        let tokens = tokenize(source);
        let doc = tokens
            .iter()
            .position(|t| t.kind == TokenKind::DocComment)
            .expect("source has a doc comment");
        extract(&tokens, doc)
    }

    #[test]
    fn test_function_signature() {
        let ctx = context_for(
            "<?php\n/** doc */\nfunction f(int $a, ?Foo\\Bar $b, string $c = null): bool {}\n",
        );
        assert_eq!(ctx.params.len(), 3);
        assert_eq!(ctx.params[0], NativeParam { name: "a".into(), ty: Some("int".into()), default_is_null: false });
        assert_eq!(ctx.params[1].ty.as_deref(), Some("?Foo\\Bar"));
        assert_eq!(ctx.params[2].name, "c");
        assert!(ctx.params[2].default_is_null);
        assert_eq!(ctx.return_type.as_deref(), Some("bool"));
    }

    #[test]
    fn test_return_type_without_params() {
        let ctx = context_for("<?php\n/** doc */\nfunction ok(): bool { return true; }\n");
        assert!(ctx.params.is_empty());
        assert_eq!(ctx.return_type.as_deref(), Some("bool"));
    }

    #[test]
    fn test_untyped_and_variadic_params() {
        let ctx = context_for("<?php\n/** doc */\nfunction f($plain, string ...$rest) {}\n");
        assert_eq!(ctx.params[0].ty, None);
        assert_eq!(ctx.params[1].name, "rest");
        assert_eq!(ctx.params[1].ty.as_deref(), Some("string"));
    }

    #[test]
    fn test_namespace_and_imports() {
        let ctx = context_for(
            "<?php\nnamespace App;\nuse Foo\\Bar;\nuse Foo\\Baz as Qux;\n/** doc */\nfunction f() {}\n",
        );
        assert_eq!(ctx.namespace.as_deref(), Some("App"));
        assert_eq!(ctx.imports.get("bar").map(String::as_str), Some("Foo\\Bar"));
        assert_eq!(ctx.imports.get("qux").map(String::as_str), Some("Foo\\Baz"));
    }

    #[test]
    fn test_enclosing_class() {
        let ctx = context_for(
            "<?php\nnamespace App;\nclass Widget {\n    /** doc */\n    public function f(self $w) {}\n}\n",
        );
        assert_eq!(ctx.class_fqcn.as_deref(), Some("App\\Widget"));
        assert_eq!(ctx.params[0].ty.as_deref(), Some("self"));
    }

    #[test]
    fn test_property_type() {
        let ctx = context_for("<?php\nclass A {\n    /** doc */\n    private ?int $count = 0;\n}\n");
        assert_eq!(ctx.property_type.as_deref(), Some("?int"));
    }

    #[test]
    fn test_method_after_modifiers_and_attribute() {
        let ctx = context_for(
            "<?php\nclass A {\n    /** doc */\n    #[Pure]\n    final public static function f(Bar $bar): static {}\n}\n",
        );
        assert_eq!(ctx.params[0].ty.as_deref(), Some("Bar"));
        assert_eq!(ctx.return_type.as_deref(), Some("static"));
    }
}
