use crate::{components::spinner, types::SpinnerSize};
use leptos::prelude::*;
use leptos_router::components::A;

pub fn component() -> impl IntoView {
    view! {
        <header class="fixed top-0 right-0 left-0 z-10 py-6 px-4 md:px-6 bg-[#1e1e1e]/80 backdrop-blur-md">
            <div class="container mx-auto max-w-5xl">
                <div class="flex flex-row justify-between items-center text-white">
                    <div class="flex flex-row gap-4 items-center">
                        {spinner::component(SpinnerSize::Sm, "text-[#ffef5c]")}
                        <div class="text-lg font-bold transition-all duration-500 sm:text-3xl hover:text-[#ffef5c]">
                            <A href="/">"glimmer"</A>
                        </div>
                    </div>
                    <nav class="flex flex-row gap-4 text-sm sm:text-base">
                        <a href="/#spinners" class="transition-all duration-500 hover:text-[#ffef5c]">"spinners"</a>
                        <a href="/#images" class="transition-all duration-500 hover:text-[#ffef5c]">"images"</a>
                    </nav>
                </div>
            </div>
        </header>
    }
}
