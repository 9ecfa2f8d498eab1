//! Function signature model.
//!
//! A [`FunctionSignature`] keeps the `syn` pieces the emitter needs (identifiers and types) next to the flags the
//! filter needs (visibility, asyncness, generics).

use gentests_core::naming;
use syn::ext::IdentExt;

/// How a method takes `self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverKind {
    /// `self` / `mut self`
    Value,
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
}

/// The type an inherent `impl` block is attached to.
#[derive(Debug, Clone)]
pub struct Owner {
    /// Last path segment of the self type, without any `r#` prefix.
    pub name: String,
    pub self_ty: syn::Type,
}

/// A named, typed parameter. Destructuring patterns get synthesized `argN` names.
#[derive(Debug, Clone)]
pub struct Param {
    pub ident: syn::Ident,
    pub ty: syn::Type,
}

/// What a function returns, as far as test assertions care.
#[derive(Debug, Clone)]
pub enum ReturnKind {
    /// No return type, `()`, or `!`.
    Unit,
    Value(syn::Type),
    /// `Result<T, E>` (any path ending in `Result`). `ok` is `None` for `Result<(), E>`.
    Result { ok: Option<syn::Type> },
}

#[derive(Debug, Clone)]
pub struct FunctionSignature {
    pub ident: syn::Ident,
    pub owner: Option<Owner>,
    pub receiver: Option<ReceiverKind>,
    pub params: Vec<Param>,
    pub output: ReturnKind,
    /// Declared plain `pub`.
    pub exported: bool,
    pub is_async: bool,
    pub is_unsafe: bool,
    /// Has type or const parameters (on the function or its impl), or `impl Trait` arguments.
    pub is_generic: bool,
}

impl FunctionSignature {
    /// Function name without any `r#` prefix.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// `Type::name` for methods, `name` for free functions.
    pub fn qualified_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{}::{}", owner.name, self.name()),
            None => self.name(),
        }
    }

    /// Name of the test generated for this function.
    pub fn test_name(&self) -> String {
        naming::test_name(self.owner.as_ref().map(|o| o.name.as_str()), &self.name())
    }
}
