//! Emit table-driven test functions.
//!
//! Each test declares its own `Args` and `Case` structs, an empty `cases` table for the user to fill in, and a
//! loop that calls the function under test and checks the result with `assert_eq!`:
//!
//! ```rust,ignore
//! #[test]
//! fn test_add() {
//!     struct Args {
//!         a: i32,
//!         b: i32,
//!     }
//!     struct Case {
//!         name: &'static str,
//!         args: Args,
//!         want: i32,
//!     }
//!     let cases: Vec<Case> = Vec::new();
//!     for case in cases {
//!         let got = add(case.args.a, case.args.b);
//!         assert_eq!(got, case.want, "{}", case.name);
//!     }
//! }
//! ```
//!
//! Tokens are built with `quote!`, parsed back with `syn`, and formatted with `prettyplease`.

use gentests_syntax::{FunctionSignature, ReceiverKind, ReturnKind};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::visit_mut::{self, VisitMut};

use crate::version::GENTESTS_VERSION;

/// Emit and format the tests for `functions`.
///
/// Returns the formatted items only; see [`new_test_file`] and [`append_tests`] for complete files.
#[tracing::instrument(skip_all, fields(count = functions.len()))]
pub fn emit_tests(functions: &[&FunctionSignature], print_inputs: bool) -> Result<String, String> {
    let items: Vec<TokenStream> = functions.iter().map(|sig| emit_test(sig, print_inputs)).collect();
    let tokens = quote! { #(#items)* };
    let file: syn::File = syn::parse2(tokens).map_err(|e| e.to_string())?;
    Ok(prettyplease::unparse(&file))
}

/// Contents of a new test file holding `tests`.
pub fn new_test_file(tests: &str, version_header: bool) -> String {
    let mut out = String::new();
    if version_header {
        out.push_str(&format!("// Generated by gentests v{GENTESTS_VERSION}\n\n"));
    }
    out.push_str("use super::*;\n\n");
    out.push_str(tests);
    out
}

/// Contents of an existing test file with `tests` appended after a blank line.
pub fn append_tests(existing: &str, tests: &str) -> String {
    let mut out = existing.to_string();
    if !out.is_empty() {
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str(tests);
    out
}

fn emit_test(sig: &FunctionSignature, print_inputs: bool) -> TokenStream {
    let mut normalizer = TypeNormalizer {
        self_ty: sig.owner.as_ref().map(|o| o.self_ty.clone()),
    };

    let test_ident = format_ident!("{}", sig.test_name());
    let fn_ident = &sig.ident;
    let arg_idents: Vec<&syn::Ident> = sig.params.iter().map(|p| &p.ident).collect();
    let arg_types: Vec<syn::Type> = sig.params.iter().map(|p| normalizer.normalize(&p.ty)).collect();
    let has_args = !arg_idents.is_empty();

    // Case fields
    let args_struct = has_args.then(|| quote! { struct Args { #(#arg_idents: #arg_types,)* } });
    let args_field = has_args.then(|| quote! { args: Args, });
    let receiver_field = match (&sig.receiver, &sig.owner) {
        (Some(_), Some(owner)) => {
            let self_ty = normalizer.normalize(&owner.self_ty);
            Some(quote! { receiver: #self_ty, })
        }
        _ => None,
    };
    let want_fields = match &sig.output {
        ReturnKind::Unit => None,
        ReturnKind::Value(ty) => {
            let ty = normalizer.normalize(ty);
            Some(quote! { want: #ty, })
        }
        ReturnKind::Result { ok: Some(ty) } => {
            let ty = normalizer.normalize(ty);
            Some(quote! { want: #ty, want_err: bool, })
        }
        ReturnKind::Result { ok: None } => Some(quote! { want_err: bool, }),
    };
    let case_attr = matches!(sig.output, ReturnKind::Unit).then(|| quote! { #[allow(dead_code)] });

    // Call expression
    let call_args: Vec<TokenStream> = arg_idents.iter().map(|ident| quote! { case.args.#ident }).collect();
    let call = match (&sig.receiver, &sig.owner) {
        (Some(_), _) => quote! { case.receiver.#fn_ident(#(#call_args),*) },
        (None, Some(owner)) => {
            let self_ty = normalizer.normalize(&owner.self_ty);
            if has_path_arguments(&self_ty) {
                quote! { <#self_ty>::#fn_ident(#(#call_args),*) }
            } else {
                quote! { #self_ty::#fn_ident(#(#call_args),*) }
            }
        }
        (None, None) => quote! { #fn_ident(#(#call_args),*) },
    };
    let call = if sig.is_unsafe { quote! { unsafe { #call } } } else { call };

    // Assertion message
    let (inputs_stmt, message) = if print_inputs {
        let input_fmt = vec!["{:?}"; arg_idents.len()].join(", ");
        let message_fmt = format!("{{}}: {}({{}})", sig.qualified_name());
        let inputs_stmt = if has_args {
            quote! { let inputs = format!(#input_fmt, #(case.args.#arg_idents),*); }
        } else {
            quote! { let inputs = ""; }
        };
        (Some(inputs_stmt), quote! { #message_fmt, case.name, inputs })
    } else {
        (None, quote! { "{}", case.name })
    };

    let body = match &sig.output {
        ReturnKind::Unit => quote! { #call; },
        ReturnKind::Value(_) => quote! {
            #inputs_stmt
            let got = #call;
            assert_eq!(got, case.want, #message);
        },
        ReturnKind::Result { ok: Some(_) } => quote! {
            #inputs_stmt
            let result = #call;
            assert_eq!(result.is_err(), case.want_err, #message);
            if let Ok(got) = result {
                assert_eq!(got, case.want, #message);
            }
        },
        ReturnKind::Result { ok: None } => quote! {
            #inputs_stmt
            let result = #call;
            assert_eq!(result.is_err(), case.want_err, #message);
        },
    };

    let case_binding = if sig.receiver == Some(ReceiverKind::RefMut) {
        quote! { mut case }
    } else {
        quote! { case }
    };

    quote! {
        #[test]
        fn #test_ident() {
            #args_struct
            #case_attr
            struct Case {
                name: &'static str,
                #receiver_field
                #args_field
                #want_fields
            }
            let cases: Vec<Case> = Vec::new();
            for #case_binding in cases {
                #body
            }
        }
    }
}

fn has_path_arguments(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .iter()
            .any(|seg| !matches!(seg.arguments, syn::PathArguments::None)),
        _ => true,
    }
}

/// Rewrite a parameter or return type so it can be stored in a local struct: every lifetime becomes
/// `'static` and `Self` becomes the owning type.
struct TypeNormalizer {
    self_ty: Option<syn::Type>,
}

impl TypeNormalizer {
    fn normalize(&mut self, ty: &syn::Type) -> syn::Type {
        let mut ty = ty.clone();
        self.visit_type_mut(&mut ty);
        ty
    }
}

impl VisitMut for TypeNormalizer {
    fn visit_type_mut(&mut self, ty: &mut syn::Type) {
        let is_self = matches!(&*ty, syn::Type::Path(p) if p.qself.is_none() && p.path.is_ident("Self"));
        if is_self {
            if let Some(self_ty) = &self.self_ty {
                *ty = self_ty.clone();
            }
        }
        visit_mut::visit_type_mut(self, ty);
    }

    fn visit_type_reference_mut(&mut self, reference: &mut syn::TypeReference) {
        reference.lifetime = Some(static_lifetime());
        visit_mut::visit_type_reference_mut(self, reference);
    }

    fn visit_lifetime_mut(&mut self, lifetime: &mut syn::Lifetime) {
        *lifetime = static_lifetime();
    }

    // Higher-ranked lifetimes stay as written.
    fn visit_type_bare_fn_mut(&mut self, _: &mut syn::TypeBareFn) {}

    fn visit_bound_lifetimes_mut(&mut self, _: &mut syn::BoundLifetimes) {}
}

fn static_lifetime() -> syn::Lifetime {
    syn::Lifetime::new("'static", proc_macro2::Span::call_site())
}
