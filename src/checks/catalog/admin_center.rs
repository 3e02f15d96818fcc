//! Section 1: Microsoft 365 admin center

use crate::admin::entra::PASSWORD_NEVER_EXPIRES_DAYS;
use crate::admin::Source;
use crate::checks::{CheckDescriptor, CheckMetadata, Expect, FieldRule, Level, License, Rule, Section};
use crate::session::Service;

pub const CHECKS: &[CheckDescriptor] = &[PASSWORD_NEVER_EXPIRES, CUSTOMER_LOCKBOX];

const PASSWORD_NEVER_EXPIRES: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "1.3.1",
        title: "Ensure the 'Password expiration policy' is set to 'Set passwords to never expire (recommended)'",
        section: Section::AdminCenter,
        level: Level::L1,
        license: License::E3,
        services: &[Service::Graph],
        description: "Microsoft cloud-only accounts have a pre-defined password policy that cannot be changed. \
            The only items that can change are the number of days until a password expires and whether \
            passwords expire at all.",
        rationale: "Organizations such as NIST and Microsoft have updated their password policy \
            recommendations to not arbitrarily require users to change their passwords after a specific \
            amount of time, unless there is evidence that the password is compromised or the user forgot it. \
            Forced rotation pushes users toward predictable passwords.",
        audit: "For every verified, non-federated domain, GET /domains/{id} and confirm \
            passwordValidityPeriodInDays is 2147483647 (never expire). An unset value means the \
            90-day default applies.",
        remediation: "Microsoft 365 admin center > Settings > Org Settings > Security & privacy > \
            Password expiration policy: check 'Set passwords to never expire (recommended)'.",
        cis_controls: &["5.2"],
        references: &[
            "https://pages.nist.gov/800-63-3/sp800-63b.html",
            "https://learn.microsoft.com/en-us/microsoft-365/admin/misc/password-policy-recommendations",
        ],
    },
    source: Source::Domains,
    rule: Rule::Each(&[FieldRule::new(
        "passwordValidityPeriodInDays",
        Expect::AtLeast(PASSWORD_NEVER_EXPIRES_DAYS),
    )
    .noted(
        "Passwords are set to never expire",
        "Passwords expire after a fixed period",
    )]),
};

const CUSTOMER_LOCKBOX: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "1.3.6",
        title: "Ensure the customer lockbox feature is enabled",
        section: Section::AdminCenter,
        level: Level::L2,
        license: License::E5,
        services: &[Service::ExchangeOnline],
        description: "Customer Lockbox ensures that Microsoft cannot access tenant content to perform a \
            service operation without explicit approval.",
        rationale: "Enabling this feature protects organizational data against data spillage and \
            exfiltration during support engagements.",
        audit: "Run Get-OrganizationConfig and confirm CustomerLockBoxEnabled is True.",
        remediation: "Microsoft 365 admin center > Settings > Org Settings > Security & privacy > \
            Customer lockbox: check 'Require approval for all data access requests', or run \
            Set-OrganizationConfig -CustomerLockBoxEnabled $true.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/azure/security/fundamentals/customer-lockbox-overview",
        ],
    },
    source: Source::OrganizationConfig,
    rule: Rule::Each(&[FieldRule::new("CustomerLockBoxEnabled", Expect::Is(true))]),
};
