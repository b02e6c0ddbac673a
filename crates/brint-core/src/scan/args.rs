use crate::version::SemanticVersion;
use syn::{Expr, ExprCall, ExprLit, ExprMethodCall, Lit};
use thiserror::Error;

/// Why a `feature(..)` declaration was rejected by the scanner
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("feature(..) takes a name and a version, found {0} arguments")]
    ArgumentCount(usize),

    #[error("feature(..)'s {0} only accepts a literal string")]
    NotLiteral(&'static str),

    #[error("feature(..)'s version '{0}' is not a valid semver version")]
    InvalidVersion(String),

    #[error("feature(..)'s version '{0}' has a prerelease, which gates do not support")]
    PrereleaseVersion(String),

    #[error("feature(..) has two .{0}(..) calls")]
    Duplicate(&'static str),

    #[error(".{0}(..) takes exactly one argument")]
    MethodArity(&'static str),

    #[error("feature(..)'s .{0}(..) only accepts a path")]
    NotPath(&'static str),

    #[error("feature(..) has both old and new")]
    BothOldAndNew,
}

/// Arguments gathered from a `feature(..)` call and its method chain
#[derive(Debug)]
pub(crate) struct DeclarationArgs {
    pub name: String,
    pub version: SemanticVersion,
    pub old: Option<String>,
    pub new: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    /// Argument of `.apply(..)`, the symbol being gated
    pub target: Option<String>,
}

fn as_string_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(value),
            ..
        }) => Some(value.value()),
        Expr::Group(group) => as_string_literal(&group.expr),
        _ => None,
    }
}

/// Render a path argument, looking through `&` and `as` casts
fn as_symbol(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Path(path) => Some(
            path.path
                .segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect::<Vec<_>>()
                .join("::"),
        ),
        Expr::Reference(reference) => as_symbol(&reference.expr),
        Expr::Cast(cast) => as_symbol(&cast.expr),
        Expr::Paren(inner) => as_symbol(&inner.expr),
        Expr::Group(group) => as_symbol(&group.expr),
        _ => None,
    }
}

fn symbol_argument(
    method: &ExprMethodCall,
    label: &'static str,
) -> Result<String, DeclarationError> {
    let arg = single_argument(method, label)?;
    as_symbol(arg).ok_or(DeclarationError::NotPath(label))
}

fn single_argument<'a>(
    method: &'a ExprMethodCall,
    label: &'static str,
) -> Result<&'a Expr, DeclarationError> {
    if method.args.len() != 1 {
        return Err(DeclarationError::MethodArity(label));
    }
    Ok(&method.args[0])
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    label: &'static str,
) -> Result<(), DeclarationError> {
    if slot.is_some() {
        return Err(DeclarationError::Duplicate(label));
    }
    *slot = Some(value);
    Ok(())
}

/// Parse the `feature(name, version)` call and the methods chained on it
///
/// Unknown methods (`resolve`, `unwrap`, ...) are ignored.
pub(crate) fn parse_declaration(
    call: &ExprCall,
    methods: &[&ExprMethodCall],
) -> Result<DeclarationArgs, DeclarationError> {
    if call.args.len() != 2 {
        return Err(DeclarationError::ArgumentCount(call.args.len()));
    }

    let name = as_string_literal(&call.args[0]).ok_or(DeclarationError::NotLiteral("name"))?;
    let version_string =
        as_string_literal(&call.args[1]).ok_or(DeclarationError::NotLiteral("version"))?;
    let version = SemanticVersion::parse(&version_string)
        .map_err(|_| DeclarationError::InvalidVersion(version_string.clone()))?;
    if !version.pre.is_empty() {
        return Err(DeclarationError::PrereleaseVersion(version_string));
    }

    let mut parsed = DeclarationArgs {
        name,
        version,
        old: None,
        new: None,
        author: None,
        description: None,
        target: None,
    };

    for method in methods {
        match method.method.to_string().as_str() {
            "old" => {
                let symbol = symbol_argument(method, "old")?;
                set_once(&mut parsed.old, symbol, "old")?;
            }
            "new" => {
                let symbol = symbol_argument(method, "new")?;
                set_once(&mut parsed.new, symbol, "new")?;
            }
            "author" => {
                let arg = single_argument(method, "author")?;
                let value = as_string_literal(arg).ok_or(DeclarationError::NotLiteral("author"))?;
                set_once(&mut parsed.author, value, "author")?;
            }
            "description" => {
                let arg = single_argument(method, "description")?;
                let value =
                    as_string_literal(arg).ok_or(DeclarationError::NotLiteral("description"))?;
                set_once(&mut parsed.description, value, "description")?;
            }
            "apply" => {
                let symbol = symbol_argument(method, "apply")?;
                set_once(&mut parsed.target, symbol, "apply")?;
            }
            _ => {}
        }
    }

    if parsed.old.is_some() && parsed.new.is_some() {
        return Err(DeclarationError::BothOldAndNew);
    }

    Ok(parsed)
}
