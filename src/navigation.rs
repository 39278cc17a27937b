//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_desktop_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm lg:bg-transparent
        lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
        dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!( a href=(self.url) class=(style) { (self.title) } )
    }

    fn into_bottom_html(self) -> Markup {
        let style = if self.is_current {
            "flex flex-col items-center justify-center w-full p-2 text-xs text-blue-500"
        } else {
            "flex flex-col items-center justify-center w-full p-2 text-xs \
            text-gray-600 dark:text-gray-300"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::HOME_VIEW,
                title: "Home",
                is_current: active_endpoint == endpoints::HOME_VIEW,
            },
            Link {
                url: endpoints::ACTIVITY_VIEW,
                title: "Activity",
                is_current: active_endpoint == endpoints::ACTIVITY_VIEW,
            },
        ];

        NavBar { links }
    }

    /// Render the desktop navigation bar and the fixed bottom navigation bar
    /// used on small screens.
    pub fn into_html(self) -> Markup {
        let links = self.links;

        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="hidden lg:block bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::ROOT)
                        class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Transit Console"
                    }

                    ul
                        class="font-medium flex flex-row space-x-8 rtl:space-x-reverse"
                    {
                        @for link in links.clone().into_iter() {
                            li { (link.into_desktop_html()) }
                        }
                    }
                }
            }

            nav
                class="fixed bottom-0 w-full bg-white border-t shadow-lg z-40 lg:hidden
                    dark:bg-gray-900 dark:border-gray-700"
                aria-label="Primary"
            {
                div class="flex justify-around items-center h-16"
                {
                    @for link in links.into_iter() {
                        (link.into_bottom_html())
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use std::collections::HashMap;

    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn set_active_endpoint() {
        let mut cases = HashMap::new();
        cases.insert(endpoints::HOME_VIEW, true);
        cases.insert(endpoints::ACTIVITY_VIEW, true);

        cases.insert(endpoints::ROOT, false);
        cases.insert(endpoints::DUTY_API, false);
        cases.insert(endpoints::INTERNAL_ERROR_VIEW, false);

        for (endpoint, should_be_active) in cases {
            let nav_bar = NavBar::new(endpoint);

            assert_link_active(nav_bar, endpoint, should_be_active);
        }
    }

    #[track_caller]
    fn assert_link_active(nav_bar: NavBar<'_>, endpoint: &str, should_be_active: bool) {
        let get_active_string = |is_active: bool| -> &str {
            if is_active {
                "active (true)"
            } else {
                "inactive (false)"
            }
        };

        for link in nav_bar.links {
            if link.url == endpoint {
                assert_eq!(
                    link.is_current,
                    should_be_active,
                    "Link for current page should be {} but got {}",
                    get_active_string(should_be_active),
                    get_active_string(link.is_current),
                )
            } else {
                assert!(
                    !link.is_current,
                    "Link for inactive page should {} but got {}",
                    get_active_string(false),
                    get_active_string(link.is_current)
                )
            }
        }
    }
}
