//! Section 8: Microsoft Teams admin center

use crate::admin::Source;
use crate::checks::{
    CheckDescriptor, CheckMetadata, Expect, FieldRule, Level, License, Notes, Rule, Section,
};
use crate::session::Service;

pub const CHECKS: &[CheckDescriptor] = &[
    CLOUD_STORAGE,
    UNMANAGED_USERS,
    SKYPE_USERS,
    ANONYMOUS_JOIN,
    ANONYMOUS_START,
    LOBBY_BYPASS,
    ANONYMOUS_CHAT,
    EXTERNAL_CONTROL,
    EXTERNAL_CHAT,
];

const GLOBAL_MEETING_POLICY: Source = Source::TeamsMeetingPolicy("Global");

const CLOUD_STORAGE: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "8.1.1",
        title: "Ensure external file sharing in Teams is enabled for only approved cloud storage services",
        section: Section::Teams,
        level: Level::L2,
        license: License::E3,
        services: &[Service::Teams],
        description: "Teams can let users share files from third-party storage providers in \
            channels and chats.",
        rationale: "Third-party storage sits outside the organization's data protection controls.",
        audit: "Run Get-CsTeamsClientConfiguration and confirm AllowDropBox, AllowBox, \
            AllowGoogleDrive, AllowShareFile and AllowEgnyte are False.",
        remediation: "Run Set-CsTeamsClientConfiguration -AllowGoogleDrive $false -AllowShareFile \
            $false -AllowBox $false -AllowDropBox $false -AllowEgnyte $false.",
        cis_controls: &["3.3"],
        references: &[
            "https://learn.microsoft.com/en-us/microsoftteams/teams-client-configuration",
        ],
    },
    source: Source::TeamsClientConfiguration,
    rule: Rule::Each(&[
        FieldRule::new("AllowDropBox", Expect::Is(false)),
        FieldRule::new("AllowBox", Expect::Is(false)),
        FieldRule::new("AllowGoogleDrive", Expect::Is(false)),
        FieldRule::new("AllowShareFile", Expect::Is(false)),
        FieldRule::new("AllowEgnyte", Expect::Is(false)),
    ]),
};

const UNMANAGED_USERS: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "8.2.2",
        title: "Ensure communication with unmanaged Teams users is disabled",
        section: Section::Teams,
        level: Level::L1,
        license: License::E3,
        services: &[Service::Teams],
        description: "Unmanaged Teams users are people using Teams with a personal Microsoft account.",
        rationale: "Chats with personal accounts are a common vector for phishing and malware \
            delivery.",
        audit: "Run Get-CsTenantFederationConfiguration and confirm AllowTeamsConsumer is False.",
        remediation: "Run Set-CsTenantFederationConfiguration -AllowTeamsConsumer $false.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/microsoftteams/trusted-organizations-external-meetings-chat",
        ],
    },
    source: Source::TenantFederationConfiguration,
    rule: Rule::Each(&[FieldRule::new("AllowTeamsConsumer", Expect::Is(false))]),
};

const SKYPE_USERS: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "8.2.3",
        title: "Ensure communication with Skype users is disabled",
        section: Section::Teams,
        level: Level::L1,
        license: License::E3,
        services: &[Service::Teams],
        description: "Teams users can be allowed to communicate with Skype consumer users.",
        rationale: "Skype consumer accounts are unmanaged and are used to deliver phishing and \
            malware.",
        audit: "Run Get-CsTenantFederationConfiguration and confirm AllowPublicUsers is False.",
        remediation: "Run Set-CsTenantFederationConfiguration -AllowPublicUsers $false.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/microsoftteams/trusted-organizations-external-meetings-chat",
        ],
    },
    source: Source::TenantFederationConfiguration,
    rule: Rule::Each(&[FieldRule::new("AllowPublicUsers", Expect::Is(false))]),
};

const ANONYMOUS_JOIN: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "8.5.1",
        title: "Ensure anonymous users can't join a meeting",
        section: Section::Teams,
        level: Level::L2,
        license: License::E3,
        services: &[Service::Teams],
        description: "Anonymous users are people who join a meeting without signing in.",
        rationale: "Anonymous participants cannot be identified, which allows eavesdropping on \
            sensitive meetings.",
        audit: "Run Get-CsTeamsMeetingPolicy -Identity Global and confirm \
            AllowAnonymousUsersToJoinMeeting is False.",
        remediation: "Run Set-CsTeamsMeetingPolicy -Identity Global \
            -AllowAnonymousUsersToJoinMeeting $false.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/microsoftteams/settings-policies-reference",
        ],
    },
    source: GLOBAL_MEETING_POLICY,
    rule: Rule::Each(&[FieldRule::new(
        "AllowAnonymousUsersToJoinMeeting",
        Expect::Is(false),
    )]),
};

const ANONYMOUS_START: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "8.5.2",
        title: "Ensure anonymous users and dial-in callers can't start a meeting",
        section: Section::Teams,
        level: Level::L1,
        license: License::E3,
        services: &[Service::Teams],
        description: "Anonymous users and dial-in callers can be allowed to start a meeting \
            without an organizer present.",
        rationale: "A meeting started by an unidentified participant can be abused before anyone \
            from the organization joins.",
        audit: "Run Get-CsTeamsMeetingPolicy -Identity Global and confirm \
            AllowAnonymousUsersToStartMeeting and AllowPSTNUsersToBypassLobby are False.",
        remediation: "Run Set-CsTeamsMeetingPolicy -Identity Global \
            -AllowAnonymousUsersToStartMeeting $false -AllowPSTNUsersToBypassLobby $false.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/microsoftteams/anonymous-users-in-meetings",
        ],
    },
    source: GLOBAL_MEETING_POLICY,
    rule: Rule::All {
        label: "Anonymous users and dial-in callers can start a meeting",
        fields: &[
            FieldRule::new("AllowAnonymousUsersToStartMeeting", Expect::Is(false)),
            FieldRule::new("AllowPSTNUsersToBypassLobby", Expect::Is(false)),
        ],
        notes: Some(Notes {
            compliant: "Meetings cannot be started by anonymous users or dial-in callers",
            non_compliant: "Anonymous users or dial-in callers can start meetings",
        }),
    },
};

const LOBBY_BYPASS: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "8.5.3",
        title: "Ensure only people in my org can bypass the lobby",
        section: Section::Teams,
        level: Level::L1,
        license: License::E3,
        services: &[Service::Teams],
        description: "The lobby setting controls who joins a meeting directly and who waits to be \
            admitted.",
        rationale: "Sending external participants to the lobby lets the organizer vet who joins.",
        audit: "Run Get-CsTeamsMeetingPolicy -Identity Global and confirm AutoAdmittedUsers is \
            EveryoneInCompanyExcludingGuests, OrganizerOnly or InvitedUsers.",
        remediation: "Run Set-CsTeamsMeetingPolicy -Identity Global -AutoAdmittedUsers \
            'EveryoneInCompanyExcludingGuests'.",
        cis_controls: &["6.8"],
        references: &[
            "https://learn.microsoft.com/en-us/microsoftteams/who-can-bypass-meeting-lobby",
        ],
    },
    source: GLOBAL_MEETING_POLICY,
    rule: Rule::Each(&[FieldRule::new(
        "AutoAdmittedUsers",
        Expect::OneOf(&["EveryoneInCompanyExcludingGuests", "OrganizerOnly", "InvitedUsers"]),
    )
    .labelled("Who can bypass the lobby")]),
};

const ANONYMOUS_CHAT: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "8.5.5",
        title: "Ensure meeting chat does not allow anonymous users",
        section: Section::Teams,
        level: Level::L2,
        license: License::E3,
        services: &[Service::Teams],
        description: "Meeting chat can be turned off for anonymous participants while staying on \
            for everyone else.",
        rationale: "Anonymous participants can post malicious links or content in meeting chat.",
        audit: "Run Get-CsTeamsMeetingPolicy -Identity Global and confirm MeetingChatEnabledType is \
            EnabledExceptAnonymous.",
        remediation: "Run Set-CsTeamsMeetingPolicy -Identity Global -MeetingChatEnabledType \
            'EnabledExceptAnonymous'.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/powershell/module/skype/set-csteamsmeetingpolicy",
        ],
    },
    source: GLOBAL_MEETING_POLICY,
    rule: Rule::Each(&[FieldRule::new(
        "MeetingChatEnabledType",
        Expect::Equals("EnabledExceptAnonymous"),
    )]),
};

const EXTERNAL_CONTROL: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "8.5.7",
        title: "Ensure external participants can't give or request control",
        section: Section::Teams,
        level: Level::L1,
        license: License::E3,
        services: &[Service::Teams],
        description: "External participants can be allowed to give or request control of a shared \
            screen during a meeting.",
        rationale: "Giving control of a screen to an external participant can let them run \
            commands on an internal device.",
        audit: "Run Get-CsTeamsMeetingPolicy -Identity Global and confirm \
            AllowExternalParticipantGiveRequestControl is False.",
        remediation: "Run Set-CsTeamsMeetingPolicy -Identity Global \
            -AllowExternalParticipantGiveRequestControl $false.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/microsoftteams/meeting-who-present-request-control",
        ],
    },
    source: GLOBAL_MEETING_POLICY,
    rule: Rule::Each(&[FieldRule::new(
        "AllowExternalParticipantGiveRequestControl",
        Expect::Is(false),
    )]),
};

const EXTERNAL_CHAT: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "8.5.8",
        title: "Ensure external meeting chat is off",
        section: Section::Teams,
        level: Level::L2,
        license: License::E3,
        services: &[Service::Teams],
        description: "External meeting chat lets people from untrusted organizations chat in \
            meetings hosted by the tenant.",
        rationale: "Chat from untrusted organizations is a vector for phishing and malicious links.",
        audit: "Run Get-CsTeamsMeetingPolicy -Identity Global and confirm \
            AllowExternalNonTrustedMeetingChat is False.",
        remediation: "Run Set-CsTeamsMeetingPolicy -Identity Global \
            -AllowExternalNonTrustedMeetingChat $false.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/powershell/module/skype/set-csteamsmeetingpolicy",
        ],
    },
    source: GLOBAL_MEETING_POLICY,
    rule: Rule::Each(&[FieldRule::new(
        "AllowExternalNonTrustedMeetingChat",
        Expect::Is(false),
    )]),
};
