//! Section 6: Exchange admin center

use crate::admin::Source;
use crate::checks::{
    CheckDescriptor, CheckMetadata, Expect, FieldRule, Level, License, Notes, ResultShape, Rule,
    Section,
};
use crate::session::Service;

pub const CHECKS: &[CheckDescriptor] = &[
    MAILBOX_AUDITING,
    MAIL_FORWARDING,
    EXTERNAL_SENDER_TAG,
    MODERN_AUTH,
    MAIL_TIPS,
    OWA_STORAGE_PROVIDERS,
    SMTP_AUTH,
];

const MAILBOX_AUDITING: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "6.1.1",
        title: "Ensure 'AuditDisabled' organizationally is set to 'False'",
        section: Section::Exchange,
        level: Level::L1,
        license: License::E3,
        services: &[Service::ExchangeOnline],
        description: "Mailbox auditing is on by default for all organizations. AuditDisabled turns \
            it off at the organization level regardless of per-mailbox settings.",
        rationale: "Mailbox audit records are needed to investigate mailbox access by owners, \
            delegates and administrators.",
        audit: "Run Get-OrganizationConfig and confirm AuditDisabled is False.",
        remediation: "Run Set-OrganizationConfig -AuditDisabled $false.",
        cis_controls: &["8.2"],
        references: &[
            "https://learn.microsoft.com/en-us/purview/audit-mailboxes",
        ],
    },
    source: Source::OrganizationConfig,
    rule: Rule::Each(&[
        FieldRule::new("AuditDisabled", Expect::Is(false)).shaped(ResultShape::Observed)
    ]),
};

const MAIL_FORWARDING: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "6.2.1",
        title: "Ensure all forms of mail forwarding are blocked and/or disabled",
        section: Section::Exchange,
        level: Level::L1,
        license: License::E3,
        services: &[Service::ExchangeOnline],
        description: "Outbound spam filter policies control whether messages can be automatically \
            forwarded to external recipients.",
        rationale: "Attackers who compromise a mailbox often create forwarding rules to exfiltrate \
            mail without further sign-ins.",
        audit: "Run Get-HostedOutboundSpamFilterPolicy and confirm AutoForwardingMode is Off for \
            every policy.",
        remediation: "Run Set-HostedOutboundSpamFilterPolicy -Identity {policy} \
            -AutoForwardingMode Off.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/defender-office-365/outbound-spam-policies-external-email-forwarding",
        ],
    },
    source: Source::OutboundSpamFilterPolicies,
    rule: Rule::Each(&[FieldRule::new("AutoForwardingMode", Expect::Equals("Off"))]),
};

const EXTERNAL_SENDER_TAG: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "6.2.3",
        title: "Ensure email from external senders is identified",
        section: Section::Exchange,
        level: Level::L1,
        license: License::E3,
        services: &[Service::ExchangeOnline],
        description: "External callouts show an 'External' tag on messages from outside the \
            organization in supported Outlook clients.",
        rationale: "Tagging external mail helps users spot phishing that impersonates internal \
            senders.",
        audit: "Run Get-ExternalInOutlook and confirm Enabled is True.",
        remediation: "Run Set-ExternalInOutlook -Enabled $true.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/powershell/module/exchange/set-externalinoutlook",
        ],
    },
    source: Source::ExternalInOutlook,
    rule: Rule::Each(&[FieldRule::new("Enabled", Expect::Is(true))
        .labelled("External sender identification")]),
};

const MODERN_AUTH: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "6.5.1",
        title: "Ensure modern authentication for Exchange Online is enabled",
        section: Section::Exchange,
        level: Level::L1,
        license: License::E3,
        services: &[Service::ExchangeOnline],
        description: "Modern authentication enables sign-in features such as multifactor \
            authentication, smart cards and third-party SAML identity providers for Outlook clients.",
        rationale: "Basic authentication sends credentials with every request and cannot enforce \
            multifactor authentication.",
        audit: "Run Get-OrganizationConfig and confirm OAuth2ClientProfileEnabled is True.",
        remediation: "Run Set-OrganizationConfig -OAuth2ClientProfileEnabled $true.",
        cis_controls: &["3.10"],
        references: &[
            "https://learn.microsoft.com/en-us/exchange/clients-and-mobile-in-exchange-online/enable-or-disable-modern-authentication-in-exchange-online",
        ],
    },
    source: Source::OrganizationConfig,
    rule: Rule::Each(&[FieldRule::new("OAuth2ClientProfileEnabled", Expect::Is(true))]),
};

const MAIL_TIPS: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "6.5.2",
        title: "Ensure MailTips are enabled for end users",
        section: Section::Exchange,
        level: Level::L2,
        license: License::E3,
        services: &[Service::ExchangeOnline],
        description: "MailTips show informative messages while users compose mail, for example \
            when a recipient is external or a group is large.",
        rationale: "Prompting users before they send to external or large audiences reduces \
            accidental data disclosure.",
        audit: "Run Get-OrganizationConfig and confirm MailTipsAllTipsEnabled, \
            MailTipsExternalRecipientsTipsEnabled and MailTipsGroupMetricsEnabled are True and \
            MailTipsLargeAudienceThreshold is 25 or less.",
        remediation: "Run Set-OrganizationConfig -MailTipsAllTipsEnabled $true \
            -MailTipsExternalRecipientsTipsEnabled $true -MailTipsGroupMetricsEnabled $true \
            -MailTipsLargeAudienceThreshold 25.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/exchange/clients-and-mobile-in-exchange-online/mailtips/mailtips",
        ],
    },
    source: Source::OrganizationConfig,
    rule: Rule::All {
        label: "MailTips",
        fields: &[
            FieldRule::new("MailTipsAllTipsEnabled", Expect::Is(true)),
            FieldRule::new("MailTipsExternalRecipientsTipsEnabled", Expect::Is(true)),
            FieldRule::new("MailTipsGroupMetricsEnabled", Expect::Is(true)),
            FieldRule::new("MailTipsLargeAudienceThreshold", Expect::AtMost(25)),
        ],
        notes: Some(Notes {
            compliant: "MailTips are enabled for end users",
            non_compliant: "One or more MailTips settings are not configured",
        }),
    },
};

const OWA_STORAGE_PROVIDERS: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "6.5.3",
        title: "Ensure additional storage providers are restricted in Outlook on the web",
        section: Section::Exchange,
        level: Level::L2,
        license: License::E3,
        services: &[Service::ExchangeOnline],
        description: "Outlook on the web can let users open and attach files from third-party \
            storage services such as Dropbox and Google Drive.",
        rationale: "Third-party storage sits outside the organization's data protection controls.",
        audit: "Run Get-OwaMailboxPolicy and confirm AdditionalStorageProvidersAvailable is False \
            for every policy.",
        remediation: "Run Set-OwaMailboxPolicy -Identity OwaMailboxPolicy-Default \
            -AdditionalStorageProvidersAvailable $false.",
        cis_controls: &["3.3"],
        references: &[
            "https://learn.microsoft.com/en-us/powershell/module/exchange/set-owamailboxpolicy",
        ],
    },
    source: Source::OwaMailboxPolicies,
    rule: Rule::Each(&[FieldRule::new(
        "AdditionalStorageProvidersAvailable",
        Expect::Is(false),
    )]),
};

const SMTP_AUTH: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "6.5.4",
        title: "Ensure SMTP AUTH is disabled",
        section: Section::Exchange,
        level: Level::L1,
        license: License::E3,
        services: &[Service::ExchangeOnline],
        description: "SMTP client authentication (authenticated SMTP submission) is a legacy \
            protocol used by POP and IMAP clients to send mail.",
        rationale: "SMTP AUTH only supports basic authentication, so it bypasses multifactor \
            authentication and is a common password spray target.",
        audit: "Run Get-TransportConfig and confirm SmtpClientAuthenticationDisabled is True.",
        remediation: "Run Set-TransportConfig -SmtpClientAuthenticationDisabled $true.",
        cis_controls: &["4.8"],
        references: &[
            "https://learn.microsoft.com/en-us/exchange/clients-and-mobile-in-exchange-online/authenticated-client-smtp-submission",
        ],
    },
    source: Source::TransportConfig,
    rule: Rule::Each(&[FieldRule::new("SmtpClientAuthenticationDisabled", Expect::Is(true))
        .labelled("SMTP Client Authentication")
        .shaped(ResultShape::Labelled)
        .noted(
            "SMTP Client Authentication is disabled",
            "SMTP Client Authentication is enabled",
        )]),
};
