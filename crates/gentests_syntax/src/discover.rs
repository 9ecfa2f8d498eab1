//! Discover testable functions and existing tests in Rust source.

use std::collections::HashSet;

use gentests_core::conventions::{ENTRYPOINT_NAME, TEST_ATTRIBUTE};
use impl_trait::type_contains_impl_trait;
use syn::ext::IdentExt;
use syn::{Attribute, FnArg, GenericParam, Generics, ImplItem, Item, Pat, ReturnType, Signature, Type, Visibility};

use crate::errors::ParseError;
use crate::signature::{FunctionSignature, Owner, Param, ReceiverKind, ReturnKind};

/// Parse `source` and return the functions a test could be generated for, in source order.
///
/// Includes top-level free functions and methods of inherent `impl` blocks. Skips `main`, `#[test]` functions,
/// `#[cfg(test)]` items, trait impls, and methods with a typed receiver (`self: Box<Self>`).
#[tracing::instrument(skip_all)]
pub fn parse_functions(source: &str) -> Result<Vec<FunctionSignature>, ParseError> {
    let file = syn::parse_file(source)?;
    let mut functions = Vec::new();

    for item in &file.items {
        match item {
            Item::Fn(func) => {
                if is_cfg_test(&func.attrs) || is_test_fn(&func.attrs) {
                    continue;
                }
                if func.sig.ident == ENTRYPOINT_NAME {
                    continue;
                }
                if let Some(sig) = signature_of(&func.sig, &func.vis, None, false) {
                    functions.push(sig);
                }
            }
            Item::Impl(imp) => {
                if imp.trait_.is_some() || is_cfg_test(&imp.attrs) {
                    continue;
                }
                let Some(owner) = owner_of(&imp.self_ty) else {
                    tracing::debug!("skipping impl block with unsupported self type");
                    continue;
                };
                let impl_generic = has_type_params(&imp.generics);
                for impl_item in &imp.items {
                    let ImplItem::Fn(method) = impl_item else {
                        continue;
                    };
                    if is_cfg_test(&method.attrs) || is_test_fn(&method.attrs) {
                        continue;
                    }
                    if let Some(sig) = signature_of(&method.sig, &method.vis, Some(owner.clone()), impl_generic) {
                        functions.push(sig);
                    }
                }
            }
            _ => {}
        }
    }

    tracing::debug!(count = functions.len(), "discovered functions");
    Ok(functions)
}

/// Parse `source` and return the names of every `#[test]` function, including those in nested modules.
pub fn parse_test_names(source: &str) -> Result<HashSet<String>, ParseError> {
    let file = syn::parse_file(source)?;
    let mut names = HashSet::new();
    collect_test_names(&file.items, &mut names);
    Ok(names)
}

fn collect_test_names(items: &[Item], names: &mut HashSet<String>) {
    for item in items {
        match item {
            Item::Fn(func) if is_test_fn(&func.attrs) => {
                names.insert(func.sig.ident.unraw().to_string());
            }
            Item::Mod(module) => {
                if let Some((_, inner)) = &module.content {
                    collect_test_names(inner, names);
                }
            }
            _ => {}
        }
    }
}

fn signature_of(sig: &Signature, vis: &Visibility, owner: Option<Owner>, impl_generic: bool) -> Option<FunctionSignature> {
    let mut receiver = None;
    let mut params = Vec::new();
    let mut is_generic = impl_generic || has_type_params(&sig.generics);

    for (index, input) in sig.inputs.iter().enumerate() {
        match input {
            FnArg::Receiver(recv) => {
                if recv.colon_token.is_some() {
                    tracing::debug!(function = %sig.ident, "skipping method with typed receiver");
                    return None;
                }
                receiver = Some(match (&recv.reference, &recv.mutability) {
                    (None, _) => ReceiverKind::Value,
                    (Some(_), None) => ReceiverKind::Ref,
                    (Some(_), Some(_)) => ReceiverKind::RefMut,
                });
            }
            FnArg::Typed(pat_type) => {
                if type_contains_impl_trait(&pat_type.ty) {
                    is_generic = true;
                }
                let ident = match pat_type.pat.as_ref() {
                    Pat::Ident(pat_ident) if pat_ident.subpat.is_none() => pat_ident.ident.clone(),
                    _ => synthesized_name(sig, index),
                };
                params.push(Param {
                    ident,
                    ty: (*pat_type.ty).clone(),
                });
            }
        }
    }

    Some(FunctionSignature {
        ident: sig.ident.clone(),
        owner,
        receiver,
        params,
        output: return_kind(&sig.output),
        exported: matches!(vis, Visibility::Public(_)),
        is_async: sig.asyncness.is_some(),
        is_unsafe: sig.unsafety.is_some(),
        is_generic,
    })
}

/// `argN` for an unnamed parameter, suffixed until it clashes with no named parameter.
fn synthesized_name(sig: &Signature, index: usize) -> syn::Ident {
    let taken: HashSet<String> = sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(pat_type) => match pat_type.pat.as_ref() {
                Pat::Ident(pat_ident) => Some(pat_ident.ident.unraw().to_string()),
                _ => None,
            },
            FnArg::Receiver(_) => None,
        })
        .collect();

    let mut name = format!("arg{index}");
    let mut suffix = 1;
    while taken.contains(&name) {
        name = format!("arg{index}_{suffix}");
        suffix += 1;
    }
    syn::Ident::new(&name, proc_macro2::Span::call_site())
}

fn owner_of(self_ty: &Type) -> Option<Owner> {
    let Type::Path(type_path) = self_ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let last = type_path.path.segments.last()?;
    Some(Owner {
        name: last.ident.unraw().to_string(),
        self_ty: self_ty.clone(),
    })
}

fn return_kind(output: &ReturnType) -> ReturnKind {
    let ty = match output {
        ReturnType::Default => return ReturnKind::Unit,
        ReturnType::Type(_, ty) => ty.as_ref(),
    };
    if is_unit(ty) {
        return ReturnKind::Unit;
    }
    if let Type::Path(type_path) = ty {
        if let Some(last) = type_path.path.segments.last() {
            if last.ident == "Result" {
                if let syn::PathArguments::AngleBracketed(args) = &last.arguments {
                    let ok = args.args.iter().find_map(|arg| match arg {
                        syn::GenericArgument::Type(t) => Some(t.clone()),
                        _ => None,
                    });
                    if let Some(ok) = ok {
                        return ReturnKind::Result {
                            ok: (!is_unit(&ok)).then_some(ok),
                        };
                    }
                }
            }
        }
    }
    ReturnKind::Value(ty.clone())
}

fn is_unit(ty: &Type) -> bool {
    match ty {
        Type::Tuple(tuple) => tuple.elems.is_empty(),
        Type::Never(_) => true,
        Type::Paren(inner) => is_unit(&inner.elem),
        _ => false,
    }
}

fn has_type_params(generics: &Generics) -> bool {
    generics
        .params
        .iter()
        .any(|p| matches!(p, GenericParam::Type(_) | GenericParam::Const(_)))
}

fn is_test_fn(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path()
            .segments
            .last()
            .is_some_and(|seg| seg.ident == TEST_ATTRIBUTE)
    })
}

fn is_cfg_test(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("cfg")
            && attr
                .parse_args::<syn::Ident>()
                .is_ok_and(|ident| ident == TEST_ATTRIBUTE)
    })
}

mod impl_trait {
    use syn::visit::{self, Visit};

    struct ImplTraitFinder {
        found: bool,
    }

    impl<'ast> Visit<'ast> for ImplTraitFinder {
        fn visit_type_impl_trait(&mut self, _: &'ast syn::TypeImplTrait) {
            self.found = true;
        }

        fn visit_type(&mut self, ty: &'ast syn::Type) {
            if !self.found {
                visit::visit_type(self, ty);
            }
        }
    }

    pub(super) fn type_contains_impl_trait(ty: &syn::Type) -> bool {
        let mut finder = ImplTraitFinder { found: false };
        finder.visit_type(ty);
        finder.found
    }
}
