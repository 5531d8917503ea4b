/// Behaviour shared by every generated page: mobile nav toggle, smooth
/// scrolling for in-page anchors, and reveal-on-scroll for `.animate-on-scroll`.
pub const RUNTIME_JS: &str = r##"document.addEventListener('DOMContentLoaded', function () {
    var mobileToggle = document.querySelector('.mobile-toggle');
    var navMenu = document.querySelector('.nav-menu');

    if (mobileToggle && navMenu) {
        mobileToggle.addEventListener('click', function () {
            this.classList.toggle('active');
            navMenu.classList.toggle('active');
        });
    }

    document.querySelectorAll('a[href^="#"]').forEach(function (anchor) {
        anchor.addEventListener('click', function (e) {
            var targetId = this.getAttribute('href');
            if (!targetId || targetId.length < 2) {
                return;
            }
            var target = document.querySelector(targetId);
            if (!target) {
                return;
            }
            e.preventDefault();
            window.scrollTo({ top: target.offsetTop - 80, behavior: 'smooth' });
            if (mobileToggle && navMenu) {
                mobileToggle.classList.remove('active');
                navMenu.classList.remove('active');
            }
        });
    });

    if ('IntersectionObserver' in window) {
        var observer = new IntersectionObserver(function (entries, obs) {
            entries.forEach(function (entry) {
                if (entry.isIntersecting) {
                    entry.target.classList.add('visible');
                    obs.unobserve(entry.target);
                }
            });
        }, { rootMargin: '0px', threshold: 0.1 });

        document.querySelectorAll('.animate-on-scroll').forEach(function (el) {
            observer.observe(el);
        });
    } else {
        document.querySelectorAll('.animate-on-scroll').forEach(function (el) {
            el.classList.add('visible');
        });
    }
});
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_covers_anchors_reveal_and_menu() {
        assert!(RUNTIME_JS.contains(r##"document.querySelectorAll('a[href^="#"]')"##));
        assert!(RUNTIME_JS.contains("IntersectionObserver"));
        assert!(RUNTIME_JS.contains(".mobile-toggle"));
        assert!(RUNTIME_JS.trim_end().ends_with("});"));
    }
}
