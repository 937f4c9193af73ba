//! Expansion of `#[introspect]`.

use dto_contract_core::naming::{is_convention_name, parse_accessor, parse_mutator};
use dto_contract_core::signature::{is_owned_self, is_reference, is_result, is_self_like, normalize_type};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Attribute, FnArg, ImplItem, ItemImpl, ReturnType, Signature, Type, Visibility};

pub(crate) fn expand_introspect(attr: TokenStream, mut item: ItemImpl) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new_spanned(attr, "`introspect` takes no arguments"));
    }
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "`introspect` must be applied to an inherent impl block",
        ));
    }

    let type_name = type_name(&item.self_ty)?;
    let mut entries = Vec::new();

    for impl_item in item.items.iter_mut() {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let skip = take_skip_attr(&mut method.attrs)?;
        if skip || !matches!(method.vis, Visibility::Public(_)) {
            continue;
        }
        if let Some(entry) = method_entry(&method.sig, &type_name) {
            entries.push(entry);
        }
    }

    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    Ok(quote! {
        #item

        impl #impl_generics ::dto_contract::Introspect for #self_ty #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }

            fn methods() -> ::std::vec::Vec<::dto_contract::MethodInfo<Self>> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}

/// Last path segment of the implementing type (`Employee` for `crate::dto::Employee`).
fn type_name(ty: &Type) -> syn::Result<String> {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .ok_or_else(|| syn::Error::new_spanned(ty, "expected a named type")),
        _ => Err(syn::Error::new_spanned(
            ty,
            "`introspect` supports impl blocks for named types only",
        )),
    }
}

/// Remove `#[dto(...)]` helper attributes, reporting whether `skip` was among them.
fn take_skip_attr(attrs: &mut Vec<Attribute>) -> syn::Result<bool> {
    let mut skip = false;
    let mut error = None;
    attrs.retain(|attr| {
        if !attr.path().is_ident("dto") {
            return true;
        }
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported `dto` option, expected `skip`"))
            }
        });
        if let Err(err) = parsed {
            error.get_or_insert(err);
        }
        false
    });
    match error {
        Some(err) => Err(err),
        None => Ok(skip),
    }
}

fn type_string(ty: &Type) -> String {
    normalize_type(&ty.to_token_stream().to_string())
}

fn method_entry(sig: &Signature, type_name: &str) -> Option<TokenStream> {
    let name = sig.ident.to_string();
    let params: Vec<&Type> = sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat) => Some(pat.ty.as_ref()),
            FnArg::Receiver(_) => None,
        })
        .collect();
    let param_types: Vec<String> = params.iter().map(|ty| type_string(ty)).collect();
    let returns = match &sig.output {
        ReturnType::Default => None,
        ReturnType::Type(_, ty) => Some(type_string(ty)),
    };
    let plain = sig.generics.params.is_empty() && sig.asyncness.is_none() && sig.unsafety.is_none();

    let (receiver, invoker) = match sig.receiver() {
        Some(receiver) => {
            if !is_convention_name(&name) {
                return None;
            }
            let kind = if receiver.colon_token.is_some() {
                ReceiverKind::Other
            } else {
                match (&receiver.reference, &receiver.mutability) {
                    (Some(_), None) => ReceiverKind::Ref,
                    (Some(_), Some(_)) => ReceiverKind::RefMut,
                    (None, _) => ReceiverKind::Value,
                }
            };
            let invoker = if !plain {
                opaque()
            } else if parse_accessor(&name).is_some()
                && kind == ReceiverKind::Ref
                && params.is_empty()
                && returns.is_some()
            {
                read_invoker(&sig.ident)
            } else if parse_mutator(&name).is_some() && kind == ReceiverKind::RefMut && params.len() == 1 {
                let fallible = returns.as_deref().is_some_and(is_result);
                write_invoker(&sig.ident, params[0], fallible)
            } else {
                opaque()
            };
            (kind, invoker)
        }
        None => {
            let is_copy_candidate = plain
                && param_types.len() == 1
                && is_self_like(&param_types[0], type_name)
                && returns.as_deref().is_some_and(|ret| is_owned_self(ret, type_name));
            if !is_copy_candidate {
                return None;
            }
            (ReceiverKind::Static, construct_invoker(&sig.ident, &param_types[0]))
        }
    };

    let receiver = receiver.tokens();
    let returns = match returns {
        Some(ret) => quote!(::std::option::Option::Some(#ret)),
        None => quote!(::std::option::Option::None),
    };

    Some(quote! {
        ::dto_contract::MethodInfo {
            name: #name,
            receiver: #receiver,
            params: &[#(#param_types),*],
            returns: #returns,
            invoker: #invoker,
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReceiverKind {
    Ref,
    RefMut,
    Value,
    Other,
    Static,
}

impl ReceiverKind {
    fn tokens(self) -> TokenStream {
        match self {
            ReceiverKind::Ref => quote!(::dto_contract::Receiver::Ref),
            ReceiverKind::RefMut => quote!(::dto_contract::Receiver::RefMut),
            ReceiverKind::Value => quote!(::dto_contract::Receiver::Value),
            ReceiverKind::Other => quote!(::dto_contract::Receiver::Other),
            ReceiverKind::Static => quote!(::dto_contract::Receiver::Static),
        }
    }
}

fn opaque() -> TokenStream {
    quote!(::dto_contract::Invoker::<Self>::Opaque)
}

fn read_invoker(ident: &syn::Ident) -> TokenStream {
    quote! {
        ::dto_contract::Invoker::<Self>::Read(|dto: &Self| {
            ::dto_contract::IntoFieldValue::into_field_value(dto.#ident())
        })
    }
}

fn write_invoker(ident: &syn::Ident, ty: &Type, fallible: bool) -> TokenStream {
    let call = if fallible {
        quote! {
            dto.#ident(value).map_err(|err| ::dto_contract::ValueError::Rejected {
                message: ::std::string::ToString::to_string(&err),
            })?;
        }
    } else {
        quote!(let _ = dto.#ident(value);)
    };
    quote! {
        ::dto_contract::Invoker::<Self>::Write(
            |dto: &mut Self,
             value: ::dto_contract::FieldValue|
             -> ::std::result::Result<(), ::dto_contract::ValueError> {
                let value = <#ty as ::dto_contract::FromFieldValue>::from_field_value(value)?;
                #call
                ::std::result::Result::Ok(())
            },
        )
    }
}

fn construct_invoker(ident: &syn::Ident, param: &str) -> TokenStream {
    if is_reference(param) {
        quote!(::dto_contract::Invoker::<Self>::Construct(|source: &Self| Self::#ident(source)))
    } else {
        quote!(::dto_contract::Invoker::<Self>::Construct(|source: &Self| {
            Self::#ident(::std::clone::Clone::clone(source))
        }))
    }
}
