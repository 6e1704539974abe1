use crate::domain::error::DomainError;

/// Marker replaced with the inlined logo `data:` URI. Everything else in the
/// template, including `{{ ... }}` placeholders, is copied verbatim.
pub const LOGO_TOKEN: &str = "__LOGO_DATA_URI__";

const CONFIRMATION_TEMPLATE: &str = include_str!("../../../templates/confirmation_email.html");

/// Base64 logo ready to be inlined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoPayload {
    pub mime: &'static str,
    pub base64: String,
}

impl LogoPayload {
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

#[derive(Debug, Clone)]
pub struct EmailTemplate {
    body: String,
}

impl EmailTemplate {
    /// Account confirmation email with Go-template placeholders for the mailer.
    pub fn confirmation() -> Self {
        Self {
            body: CONFIRMATION_TEMPLATE.to_string(),
        }
    }

    pub fn from_string(body: String) -> Result<Self, DomainError> {
        if !body.contains(LOGO_TOKEN) {
            return Err(DomainError::InvalidInput(format!(
                "template has no {} marker",
                LOGO_TOKEN
            )));
        }
        Ok(Self { body })
    }

    pub fn render(&self, logo: &LogoPayload) -> String {
        self.body.replace(LOGO_TOKEN, &logo.data_uri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> LogoPayload {
        LogoPayload {
            mime: "image/png",
            base64: "iVBORw0KGgo=".to_string(),
        }
    }

    #[test]
    fn test_confirmation_template_carries_marker() {
        assert!(EmailTemplate::from_string(CONFIRMATION_TEMPLATE.to_string()).is_ok());
    }

    #[test]
    fn test_render_inlines_payload_and_keeps_placeholders() {
        let html = EmailTemplate::confirmation().render(&payload());

        assert!(html.contains("src=\"data:image/png;base64,iVBORw0KGgo=\""));
        assert!(!html.contains(LOGO_TOKEN));
        for placeholder in [
            "{{ if eq .Data.role \"employer\" }}",
            "{{ else }}",
            "{{ end }}",
            "<a href=\"{{ .ConfirmationURL }}\" class=\"btn\">",
        ] {
            assert!(html.contains(placeholder), "missing {}", placeholder);
        }
        assert_eq!(html.matches("{{ .ConfirmationURL }}").count(), 3);
    }

    #[test]
    fn test_render_changes_nothing_but_the_marker() {
        let template = EmailTemplate::from_string("<p>{{ .Name }}</p><img src=\"__LOGO_DATA_URI__\">{{x}}".to_string()).unwrap();
        assert_eq!(
            template.render(&payload()),
            "<p>{{ .Name }}</p><img src=\"data:image/png;base64,iVBORw0KGgo=\">{{x}}"
        );
    }

    #[test]
    fn test_template_without_marker_is_rejected() {
        let err = EmailTemplate::from_string("<html>{{ .ConfirmationURL }}</html>".to_string()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
