use super::args::{parse_declaration, DeclarationArgs, DeclarationError};
use super::{Diagnostic, FeatureDecl};
use std::collections::HashSet;
use std::path::Path;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{Expr, ExprCall, ExprMethodCall, ImplItemFn, ItemFn, TraitItemFn};

/// A `feature(..)` call and the methods chained on it, innermost first
struct Chain<'ast> {
    call: &'ast ExprCall,
    methods: Vec<&'ast ExprMethodCall>,
}

fn is_feature_callee(func: &Expr) -> bool {
    match func {
        Expr::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "feature"),
        _ => false,
    }
}

/// Walk receivers down to a `feature(..)` call, through `?` and parentheses
fn collect_chain(expr: &Expr) -> Option<Chain<'_>> {
    let mut methods = Vec::new();
    let mut current = expr;
    loop {
        match current {
            Expr::MethodCall(method) => {
                methods.push(method);
                current = &*method.receiver;
            }
            Expr::Try(inner) => current = &*inner.expr,
            Expr::Paren(inner) => current = &*inner.expr,
            Expr::Call(call) if is_feature_callee(&call.func) => {
                methods.reverse();
                return Some(Chain { call, methods });
            }
            _ => return None,
        }
    }
}

pub(crate) struct DeclarationVisitor<'a> {
    path: &'a Path,
    enclosing: Vec<String>,
    seen: HashSet<(usize, usize)>,
    pub features: Vec<FeatureDecl>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> DeclarationVisitor<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self {
            path,
            enclosing: Vec::new(),
            seen: HashSet::new(),
            features: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn record(&mut self, chain: Chain<'_>) {
        let start = chain.call.span().start();
        // The outermost expression of a chain is visited first
        if !self.seen.insert((start.line, start.column)) {
            return;
        }

        match parse_declaration(chain.call, &chain.methods) {
            Ok(args) => self.push_feature(start.line, args),
            Err(error) => self.push_diagnostic(start.line, error),
        }
    }

    fn push_feature(&mut self, line: usize, args: DeclarationArgs) {
        let target = args
            .target
            .or_else(|| self.enclosing.last().cloned())
            .unwrap_or_else(|| "<expression>".to_string());

        // old and new are never both present here
        let (old, new) = match (args.old, args.new) {
            (Some(old), _) => (Some(old), target),
            (None, Some(new)) => (Some(target), new),
            (None, None) => (None, target),
        };

        self.features.push(FeatureDecl {
            path: self.path.to_path_buf(),
            line,
            feature_name: args.name,
            version: args.version,
            new,
            old,
            author: args.author,
            description: args.description,
        });
    }

    fn push_diagnostic(&mut self, line: usize, error: DeclarationError) {
        log::warn!("{}:{}: {}", self.path.display(), line, error);
        self.diagnostics.push(Diagnostic {
            path: self.path.to_path_buf(),
            line,
            error,
        });
    }
}

impl<'ast> Visit<'ast> for DeclarationVisitor<'_> {
    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        self.enclosing.push(format!("fn {}", node.sig.ident));
        visit::visit_item_fn(self, node);
        self.enclosing.pop();
    }

    fn visit_impl_item_fn(&mut self, node: &'ast ImplItemFn) {
        self.enclosing.push(format!("fn {}", node.sig.ident));
        visit::visit_impl_item_fn(self, node);
        self.enclosing.pop();
    }

    fn visit_trait_item_fn(&mut self, node: &'ast TraitItemFn) {
        self.enclosing.push(format!("fn {}", node.sig.ident));
        visit::visit_trait_item_fn(self, node);
        self.enclosing.pop();
    }

    fn visit_expr(&mut self, node: &'ast Expr) {
        if let Some(chain) = collect_chain(node) {
            self.record(chain);
        }
        visit::visit_expr(self, node);
    }
}
