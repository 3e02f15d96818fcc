//! Section 2: Microsoft 365 Defender

use crate::admin::Source;
use crate::checks::{CheckDescriptor, CheckMetadata, Expect, FieldRule, Level, License, Rule, Section};
use crate::session::Service;

pub const CHECKS: &[CheckDescriptor] = &[
    COMMON_ATTACHMENT_FILTER,
    INTERNAL_MALWARE_NOTIFICATIONS,
    DKIM_ENABLED,
];

const COMMON_ATTACHMENT_FILTER: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "2.1.2",
        title: "Ensure the Common Attachment Types Filter is enabled",
        section: Section::Defender,
        level: Level::L1,
        license: License::E3,
        services: &[Service::ExchangeOnline],
        description: "The Common Attachment Types Filter lets a user block known and custom malicious \
            file types from being attached to emails.",
        rationale: "Blocking known malicious file types helps prevent malware-infested files from \
            infecting a host.",
        audit: "Run Get-MalwareFilterPolicy and confirm EnableFileFilter is True for every policy.",
        remediation: "Microsoft 365 Defender > Email & collaboration > Policies & rules > Threat \
            policies > Anti-malware: edit each policy and enable the common attachments filter, or run \
            Set-MalwareFilterPolicy -Identity Default -EnableFileFilter $true.",
        cis_controls: &["9.6"],
        references: &[
            "https://learn.microsoft.com/en-us/powershell/module/exchange/get-malwarefilterpolicy",
        ],
    },
    source: Source::MalwareFilterPolicies,
    rule: Rule::Each(&[FieldRule::new("EnableFileFilter", Expect::Is(true))]),
};

const INTERNAL_MALWARE_NOTIFICATIONS: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "2.1.3",
        title: "Ensure notifications for internal users sending malware is Enabled",
        section: Section::Defender,
        level: Level::L1,
        license: License::E3,
        services: &[Service::ExchangeOnline],
        description: "Exchange Online Protection can notify an administrator when an internal user \
            sends a message that contains malware.",
        rationale: "An internal account sending malware is a strong signal of compromise. \
            Notification lets administrators react before the malware spreads.",
        audit: "Run Get-MalwareFilterPolicy and confirm EnableInternalSenderAdminNotifications is True \
            and InternalSenderAdminAddress is set.",
        remediation: "Run Set-MalwareFilterPolicy -Identity '{Policy}' \
            -EnableInternalSenderAdminNotifications $true -InternalSenderAdminAddress {admin@domain}.",
        cis_controls: &["17.5"],
        references: &[
            "https://learn.microsoft.com/en-us/defender-office-365/anti-malware-policies-configure",
        ],
    },
    source: Source::MalwareFilterPolicies,
    rule: Rule::Each(&[FieldRule::new(
        "EnableInternalSenderAdminNotifications",
        Expect::Is(true),
    )]),
};

const DKIM_ENABLED: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "2.1.9",
        title: "Ensure that DKIM is enabled for all Exchange Online Domains",
        section: Section::Defender,
        level: Level::L1,
        license: License::E3,
        services: &[Service::ExchangeOnline],
        description: "DKIM adds a digital signature to outbound mail that receiving systems verify \
            against a public key published in DNS.",
        rationale: "Signing outbound mail lets recipients detect spoofed messages that claim to come \
            from the organization's domains.",
        audit: "Run Get-DkimSigningConfig and confirm Enabled is True for every domain.",
        remediation: "Publish the selector1 and selector2 CNAME records, then run \
            Set-DkimSigningConfig -Identity {domain} -Enabled $true.",
        cis_controls: &["9.5"],
        references: &[
            "https://learn.microsoft.com/en-us/defender-office-365/email-authentication-dkim-configure",
        ],
    },
    source: Source::DkimSigningConfigs,
    rule: Rule::Each(&[FieldRule::new("Enabled", Expect::Is(true)).noted(
        "DKIM signing is enabled",
        "DKIM signing is disabled",
    )]),
};
