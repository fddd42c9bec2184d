//! Persona presets — the two seats in a boardroom collaboration.

use boardroom_core::identity::AgentIdentity;

pub const PRODUCT_OWNER_NAME: &str = "Product Owner";
pub const CTO_NAME: &str = "CTO";

const PRODUCT_OWNER_TEMPLATE: &str = "You are a {name} 👔 focused on business value and user needs.
You should:
1. Consider business impact and ROI 💰
2. Focus on user value and experience 👥
3. Balance technical feasibility with business goals ⚖️
4. Communicate clearly and concisely 📝
5. Keep responses brief and to the point 🎯";

const CTO_TEMPLATE: &str = "You are a {name} 🎮 focused on technical excellence and system architecture.
You should:
1. Consider technical feasibility and scalability 🚀
2. Focus on system architecture and security 🔒
3. Balance technical debt with business needs ⚖️
4. Communicate technical concepts clearly 📊
5. Keep responses detailed and comprehensive 📝";

/// The business-side initiator.
pub fn product_owner() -> AgentIdentity {
    AgentIdentity::new(PRODUCT_OWNER_NAME, PRODUCT_OWNER_TEMPLATE)
}

/// The technical-side responder.
pub fn cto() -> AgentIdentity {
    AgentIdentity::new(CTO_NAME, CTO_TEMPLATE)
}

/// A system prompt template built around an agent's `role.md`.
///
/// `{name}` is left in place so the identity renders it.
pub fn role_template(role_document: &str) -> String {
    format!(
        "You are an AI agent acting as a {{name}}.
Your role and responsibilities are defined in the following knowledge base:

{role_document}

You should:
1. Always act according to your defined role and responsibilities
2. Make decisions based on your decision-making framework
3. Communicate in your specified style
4. Focus on your key areas of expertise

When responding to queries or making decisions, always consider your role and expertise."
    )
}

/// Replace a preset's prompt with one derived from its role document.
pub fn with_role_document(identity: &AgentIdentity, role_document: &str) -> AgentIdentity {
    AgentIdentity::new(identity.name.clone(), role_template(role_document))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_render_names() {
        let po = product_owner();
        assert!(po.system_prompt().starts_with("You are a Product Owner 👔"));
        assert_eq!(po.slug(), "product_owner");

        let cto = cto();
        assert!(cto.system_prompt().starts_with("You are a CTO 🎮"));
        assert!(cto.system_prompt().contains("system architecture and security"));
    }

    #[test]
    fn role_document_prompt() {
        let id = with_role_document(&cto(), "# CTO\nOwns the platform.");
        let prompt = id.system_prompt();
        assert!(prompt.starts_with("You are an AI agent acting as a CTO.\n"));
        assert!(prompt.contains("# CTO\nOwns the platform."));
        assert!(prompt.ends_with("always consider your role and expertise."));
    }
}
