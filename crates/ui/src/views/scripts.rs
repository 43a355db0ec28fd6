/// Arrow keys follow the previous/next links, Ctrl+C submits the
/// mark-complete form. Keys typed into inputs are left alone.
pub(super) const KEYBOARD_NAVIGATION_SCRIPT: &str = r#"(function() {
    if (window.__learnKeyboardNav) {
        return;
    }
    window.__learnKeyboardNav = true;
    document.addEventListener("keydown", function(event) {
        const target = event.target;
        if (target instanceof HTMLInputElement || target instanceof HTMLTextAreaElement) {
            return;
        }
        if (event.key === "ArrowRight" || event.key === "ArrowLeft") {
            const which = event.key === "ArrowRight" ? "next" : "previous";
            const link = document.querySelector('a[data-nav="' + which + '"]');
            if (link) {
                event.preventDefault();
                window.location.href = link.href;
            }
        } else if (event.key === "c" && event.ctrlKey) {
            const form = document.getElementById("complete-form");
            if (form) {
                event.preventDefault();
                form.submit();
            }
        }
    });
})();"#;
