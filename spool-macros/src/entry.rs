use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn, ReturnType};


pub(crate) fn main_impl(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = input;

    if sig.asyncness.is_some() {
        return syn::Error::new_spanned(sig.fn_token, "spool::main functions run on fibers and must not be async")
            .to_compile_error()
            .into();
    }

    let stmts = block.stmts;

    // Spell the return type out so `?` inside the body has a target.
    let root = match &sig.output {
        ReturnType::Default => quote! {
            move || { #(#stmts)* }
        },
        ReturnType::Type(_, ty) => quote! {
            move || -> #ty { #(#stmts)* }
        },
    };

    quote! {
        #(#attrs)*
        #vis #sig {
            ::spool::runtime::block_on(#root)
        }
    }.into()
}
