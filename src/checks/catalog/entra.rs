//! Section 5: Microsoft Entra admin center

use crate::admin::entra::RESTRICTED_GUEST_ROLE_IDS;
use crate::admin::Source;
use crate::checks::{CheckDescriptor, CheckMetadata, Expect, FieldRule, Level, License, Rule, Section};
use crate::session::Service;

pub const CHECKS: &[CheckDescriptor] = &[
    APP_REGISTRATION,
    TENANT_CREATION,
    USER_CONSENT,
    GUEST_ACCESS,
];

const APP_REGISTRATION: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "5.1.2.2",
        title: "Ensure third party integrated applications are not allowed",
        section: Section::Entra,
        level: Level::L2,
        license: License::E3,
        services: &[Service::Graph],
        description: "App registration allows users to register custom-developed applications for \
            use within the directory.",
        rationale: "Third-party integrated applications can be used to exfiltrate data. Registration \
            should be reserved for administrators.",
        audit: "GET /policies/authorizationPolicy and confirm \
            defaultUserRolePermissions.allowedToCreateApps is false.",
        remediation: "Microsoft Entra admin center > Identity > Users > User settings: set \
            'Users can register applications' to No.",
        cis_controls: &["2.5"],
        references: &[
            "https://learn.microsoft.com/en-us/entra/identity-platform/how-applications-are-added",
        ],
    },
    source: Source::AuthorizationPolicy,
    rule: Rule::Each(&[FieldRule::new(
        "defaultUserRolePermissions.allowedToCreateApps",
        Expect::Is(false),
    )
    .labelled("Users can register applications")]),
};

const TENANT_CREATION: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "5.1.2.3",
        title: "Ensure 'Restrict non-admin users from creating tenants' is set to 'Yes'",
        section: Section::Entra,
        level: Level::L1,
        license: License::E3,
        services: &[Service::Graph],
        description: "Non-privileged users can be allowed to create new Entra ID tenants, becoming \
            the Global Administrator of the tenant they create.",
        rationale: "Restricting tenant creation prevents shadow tenants that sit outside the \
            organization's governance.",
        audit: "GET /policies/authorizationPolicy and confirm \
            defaultUserRolePermissions.allowedToCreateTenants is false.",
        remediation: "Microsoft Entra admin center > Identity > Users > User settings: set \
            'Restrict non-admin users from creating tenants' to Yes.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/entra/fundamentals/users-default-permissions",
        ],
    },
    source: Source::AuthorizationPolicy,
    rule: Rule::Each(&[FieldRule::new(
        "defaultUserRolePermissions.allowedToCreateTenants",
        Expect::Is(false),
    )
    .labelled("Non-admin users can create tenants")]),
};

const USER_CONSENT: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "5.1.5.1",
        title: "Ensure user consent to apps accessing company data on their behalf is not allowed",
        section: Section::Entra,
        level: Level::L2,
        license: License::E3,
        services: &[Service::Graph],
        description: "Control when end users and group owners are allowed to grant consent to \
            applications, and when they are required to request administrator review.",
        rationale: "Attackers commonly use custom applications to trick users into granting access \
            to company data (consent phishing).",
        audit: "GET /policies/authorizationPolicy and confirm no entry of \
            defaultUserRolePermissions.permissionGrantPoliciesAssigned starts with \
            'ManagePermissionGrantsForSelf.'.",
        remediation: "Microsoft Entra admin center > Identity > Applications > Enterprise \
            applications > Consent and permissions > User consent settings: select 'Do not allow \
            user consent'.",
        cis_controls: &["2.5"],
        references: &[
            "https://learn.microsoft.com/en-us/entra/identity/enterprise-apps/configure-user-consent",
        ],
    },
    source: Source::AuthorizationPolicy,
    rule: Rule::Each(&[FieldRule::new(
        "defaultUserRolePermissions.permissionGrantPoliciesAssigned",
        Expect::NoneStartingWith("ManagePermissionGrantsForSelf."),
    )
    .labelled("User consent for applications")
    .noted(
        "User consent is not allowed",
        "Users can consent to applications accessing company data",
    )]),
};

const GUEST_ACCESS: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "5.1.6.2",
        title: "Ensure that guest user access is restricted",
        section: Section::Entra,
        level: Level::L1,
        license: License::E3,
        services: &[Service::Graph],
        description: "Guest user access restrictions set how much a guest can see of the directory.",
        rationale: "By limiting guest access to the most restrictive state, guests cannot enumerate \
            users, groups or other directory resources.",
        audit: "GET /policies/authorizationPolicy and confirm guestUserRoleId is \
            10dae51f-b6af-4016-8d66-8c2a99b929b3 or 2af84b1e-32c8-42b7-82bc-daa82404023b.",
        remediation: "Microsoft Entra admin center > Identity > External Identities > External \
            collaboration settings: set 'Guest user access' to 'Guest users have limited access' or \
            'Guest user access is restricted'.",
        cis_controls: &["6.1"],
        references: &[
            "https://learn.microsoft.com/en-us/entra/identity/users/users-restrict-guest-permissions",
        ],
    },
    source: Source::AuthorizationPolicy,
    rule: Rule::Each(&[FieldRule::new(
        "guestUserRoleId",
        Expect::OneOf(RESTRICTED_GUEST_ROLE_IDS),
    )
    .labelled("Guest user access")]),
};
